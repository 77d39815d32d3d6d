use serde::Deserialize;

use crate::error::WaitlistError;

/// The body posted by the signup form. Every field is optional here so that
/// a missing field is reported as a validation error rather than a decode
/// failure.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub platform: Option<String>,
}

impl SignupRequest {
    #[must_use]
    pub fn new(first_name: &str, email: &str, platform: &str) -> Self {
        SignupRequest {
            first_name: Some(first_name.to_string()),
            email: Some(email.to_string()),
            platform: Some(platform.to_string()),
        }
    }
}

/// A validated signup. Fields are trimmed and the email is lowercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signup {
    pub first_name: String,
    pub email: String,
    pub platform: String,
}

impl TryFrom<SignupRequest> for Signup {
    type Error = WaitlistError;

    fn try_from(request: SignupRequest) -> Result<Self, Self::Error> {
        let first_name = required(request.first_name, "firstName")?;
        let email = required(request.email, "email")?.to_lowercase();
        let platform = required(request.platform, "platform")?;

        Ok(Signup {
            first_name,
            email,
            platform,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, WaitlistError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(WaitlistError::MissingField(field))
}
