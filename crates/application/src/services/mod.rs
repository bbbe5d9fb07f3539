//! Per-endpoint service adapters.
//!
//! Each service fixes its endpoint URL, builds the headers the endpoint
//! expects, and turns a non-2xx answer into [`ApplicationError::RequestFailed`].

mod login;
mod update_password;

pub use login::LoginService;
pub use update_password::{UPDATE_PASSWORD_PATH, UpdatePasswordService};

use authprobe_domain::ResponseSpec;
use tracing::warn;

use crate::error::{ApplicationError, ApplicationResult};

fn ensure_ok(operation: &'static str, response: ResponseSpec) -> ApplicationResult<ResponseSpec> {
    if response.ok() {
        return Ok(response);
    }
    warn!(
        operation,
        status = response.status,
        status_text = %response.status_text,
        "request rejected"
    );
    Err(ApplicationError::RequestFailed {
        operation,
        status: response.status,
        status_text: response.status_text.clone(),
        response: Box::new(response),
    })
}
