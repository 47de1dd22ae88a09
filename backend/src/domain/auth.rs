//! Authentication primitives: login credentials and signup submissions.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::ports::INVALID_CREDENTIALS;
use super::{EmailAddress, Error, UserValidationError, Username};

/// Message returned when any signup field is missing.
pub const MISSING_SIGNUP_FIELDS: &str = "Please provide username, email and password";
/// Message returned when the password confirmation differs.
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username or email was missing or blank once trimmed.
    EmptyIdentifier,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentifier => write!(f, "username or email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Blank login fields fail exactly like a wrong password.
impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        tracing::debug!(reason = %value, "login rejected before lookup");
        Self::unauthorized(INVALID_CREDENTIALS)
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `identifier` is trimmed and must not be empty after trimming. It is
///   matched against both usernames and email addresses.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use feedeyes::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "pw1").unwrap();
/// assert_eq!(creds.identifier(), "alice");
/// assert_eq!(creds.password(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier/password inputs.
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = identifier.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyIdentifier);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            identifier: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username or email supplied by the caller.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Reasons a signup submission is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username, email or password was blank.
    MissingFields,
    /// Password and confirmation differ.
    PasswordMismatch,
    /// A field failed its shape constraints.
    Invalid(UserValidationError),
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => f.write_str(MISSING_SIGNUP_FIELDS),
            Self::PasswordMismatch => f.write_str(PASSWORD_MISMATCH),
            Self::Invalid(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<RegistrationValidationError> for Error {
    fn from(value: RegistrationValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Validated signup submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw signup form values.
    ///
    /// Blank fields are reported before the confirmation check, and both
    /// before any length or shape constraint.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        if username.trim().is_empty()
            || email.trim().is_empty()
            || password.is_empty()
            || confirm_password.is_empty()
        {
            return Err(RegistrationValidationError::MissingFields);
        }
        if password != confirm_password {
            return Err(RegistrationValidationError::PasswordMismatch);
        }

        let username = Username::new(username).map_err(RegistrationValidationError::Invalid)?;
        let email = EmailAddress::new(email).map_err(RegistrationValidationError::Invalid)?;
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("   ", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);

        let mapped = Error::from(err);
        assert_eq!(mapped.code(), crate::domain::ErrorCode::Unauthorized);
        assert_eq!(mapped.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[case("  alice  ", "secret")]
    #[case("a@x.com", " padded password ")]
    fn valid_credentials_trim_identifier(#[case] identifier: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(identifier, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.identifier(), identifier.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("", "a@x.com", "pw", "pw", RegistrationValidationError::MissingFields)]
    #[case("alice", " ", "pw", "pw", RegistrationValidationError::MissingFields)]
    #[case("alice", "a@x.com", "", "", RegistrationValidationError::MissingFields)]
    #[case("alice", "a@x.com", "pw", "", RegistrationValidationError::MissingFields)]
    #[case("alice", "a@x.com", "pw1", "pw2", RegistrationValidationError::PasswordMismatch)]
    #[case(
        "alice",
        "not-an-email",
        "pw",
        "pw",
        RegistrationValidationError::Invalid(UserValidationError::EmailMissingAt)
    )]
    fn rejects_bad_signups(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = Registration::try_from_parts(username, email, password, confirm)
            .expect_err("invalid signup must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn signup_messages_match_the_forms() {
        assert_eq!(
            RegistrationValidationError::MissingFields.to_string(),
            "Please provide username, email and password"
        );
        assert_eq!(
            RegistrationValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[rstest]
    fn accepts_a_complete_signup() {
        let registration = Registration::try_from_parts(" alice ", "a@x.com", "pw1", "pw1")
            .expect("valid signup");
        assert_eq!(registration.username().as_ref(), "alice");
        assert_eq!(registration.email().as_ref(), "a@x.com");
        assert_eq!(registration.password(), "pw1");
    }
}
