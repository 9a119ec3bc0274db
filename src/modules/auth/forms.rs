//! Login and signup form validation.

use serde::Deserialize;

use bookrack_http::forms::{required, FieldErrors};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginSubmit {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

impl LoginSubmit {
    pub fn validate(&self) -> Result<LoginData, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = required(&mut errors, "username", &self.username);
        if !username.is_empty() && !is_valid_email(&username) {
            errors.push("username", "Invalid Email");
        }

        let password = required(&mut errors, "password", &self.password);
        if !password.is_empty() && !(8..=16).contains(&password.chars().count()) {
            errors.push("password", "Password must be between 8 and 16 characters");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LoginData { username, password })
    }

    pub fn username_value(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}

/// Validated by the route layer but never consumed by a controller: the
/// signup page has no POST handler and no user entity exists yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupSubmit {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl SignupSubmit {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = required(&mut errors, "email", &self.email);
        if !email.is_empty() && !is_valid_email(&email) {
            errors.push("email", "Invalid Email");
        }

        required(&mut errors, "username", &self.username);
        let password = required(&mut errors, "password", &self.password);
        let confirm = required(&mut errors, "confirm_password", &self.confirm_password);

        if !password.is_empty() && !confirm.is_empty() && password != confirm {
            errors.push("confirm_password", "Passwords must match");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}
