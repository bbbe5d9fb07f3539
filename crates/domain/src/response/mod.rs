//! Response types.

mod spec;

pub use spec::{ResponseSpec, StatusCode};
