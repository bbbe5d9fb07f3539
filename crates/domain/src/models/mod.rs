//! Request and response bodies of the login and password update endpoints.

mod error_body;
mod login;
mod password;

pub use error_body::ErrorBody;
pub use login::{LoginRequest, LoginResponse};
pub use password::{
    MAX_FIELD_LEN, MIN_PASSWORD_LEN, UpdatePasswordRequest, UpdatePasswordResponse,
};
