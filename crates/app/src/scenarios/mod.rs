//! Scenario catalog for both endpoints.
//!
//! A scenario drives one endpoint service and records its checks into a
//! [`SoftAssertions`] unit. Returning an error aborts the scenario; soft
//! failures are reported when the unit closes.

mod login;
mod update_password;

use std::fmt;

use authprobe_application::{ApplicationError, ApplicationResult};
use authprobe_domain::ResponseSpec;
use serde::{Serialize, Serializer};
use serde_json::Value;

pub use login::LoginScenario;
pub use update_password::UpdatePasswordScenario;

/// Endpoint a scenario exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Login process endpoint.
    Login,
    /// Password update endpoint.
    UpdatePassword,
}

impl Endpoint {
    /// Stable identifier used in scenario ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::UpdatePassword => "update-password",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thematic grouping of scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioGroup {
    /// Well-formed requests that must succeed.
    Positive,
    /// Malformed payloads that must be rejected.
    Negative,
    /// Missing or wrong credentials.
    Authentication,
    /// Leakage and caching checks.
    Security,
    /// Shape of error responses.
    ErrorHandling,
}

impl fmt::Display for ScenarioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Authentication => "authentication",
            Self::Security => "security",
            Self::ErrorHandling => "error handling",
        })
    }
}

/// Any scenario of the catalog. Serializes as its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// A login endpoint scenario.
    Login(LoginScenario),
    /// A password update endpoint scenario.
    UpdatePassword(UpdatePasswordScenario),
}

impl Scenario {
    /// Every scenario, login first.
    pub fn all() -> impl Iterator<Item = Self> {
        LoginScenario::ALL
            .into_iter()
            .map(Self::Login)
            .chain(UpdatePasswordScenario::ALL.into_iter().map(Self::UpdatePassword))
    }

    /// Endpoint under test.
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Login(_) => Endpoint::Login,
            Self::UpdatePassword(_) => Endpoint::UpdatePassword,
        }
    }

    /// Group the scenario belongs to.
    #[must_use]
    pub const fn group(self) -> ScenarioGroup {
        match self {
            Self::Login(s) => s.group(),
            Self::UpdatePassword(s) => s.group(),
        }
    }

    /// Short identifier, unique within the endpoint.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login(s) => s.name(),
            Self::UpdatePassword(s) => s.name(),
        }
    }

    /// What the scenario asserts, in words.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Login(s) => s.description(),
            Self::UpdatePassword(s) => s.description(),
        }
    }

    /// `endpoint/name`.
    #[must_use]
    pub fn id(self) -> String {
        format!("{}/{}", self.endpoint(), self.name())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.endpoint(), self.name())
    }
}

impl Serialize for Scenario {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Turns a service rejection back into the response it carried, so negative
/// scenarios can assert on it. A 2xx response passes through unchanged and
/// fails the scenario's own status checks instead.
///
/// # Errors
///
/// Propagates every error other than [`ApplicationError::RequestFailed`].
pub fn expect_rejection(result: ApplicationResult<ResponseSpec>) -> ApplicationResult<ResponseSpec> {
    match result {
        Ok(response) => Ok(response),
        Err(err @ ApplicationError::RequestFailed { .. }) => err
            .into_response()
            .ok_or(ApplicationError::MissingResponse("Rejected response")),
        Err(err) => Err(err),
    }
}

/// Decodes a JSON body, treating anything undecodable as absent.
fn decoded(response: &ResponseSpec) -> Option<Value> {
    response.json_value().ok()
}
