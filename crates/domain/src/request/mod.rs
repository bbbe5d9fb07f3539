//! Request types: method, headers, and the request specification.

mod headers;
mod method;
mod spec;

pub use headers::{
    APPLICATION_JSON, AUTHORIZATION, CONTENT_TYPE, Header, Headers, SESSION_ID,
};
pub use method::HttpMethod;
pub use spec::RequestSpec;
