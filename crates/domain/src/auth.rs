//! Mock authentication.
//!
//! There is no identity provider: logging in only flips a local flag once
//! the form's required fields are present. Forms validate what the sign-in,
//! sign-up and change-password dialogs check before submitting.

use thiserror::Error;

/// Errors raised by the auth forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A required form field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Password and confirmation differ.
    #[error("New passwords do not match.")]
    PasswordMismatch,
}

fn required(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

/// Sign-in form.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        required(&self.email, "Email")?;
        required(&self.password, "Password")
    }
}

/// Sign-up form.
#[derive(Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        required(&self.name, "Name")?;
        required(&self.email, "Email")?;
        required(&self.password, "Password")?;
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Change-password form.
#[derive(Clone, Default)]
pub struct ChangePasswordForm {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    /// Checks required fields, then that the new password was typed twice
    /// the same way.
    pub fn validate(&self) -> Result<(), AuthError> {
        required(&self.email, "Email")?;
        required(&self.current_password, "Current password")?;
        required(&self.new_password, "New password")?;
        if self.new_password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Local, non-persistent sign-in state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    email: Option<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }

    /// The signed-in email, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Marks the session signed in. No credential check is performed.
    pub fn login(&mut self, form: &LoginForm) -> Result<(), AuthError> {
        form.validate()?;
        tracing::info!(email = %form.email, "signed in");
        self.email = Some(form.email.trim().to_string());
        Ok(())
    }

    /// Registers and signs in.
    pub fn register(&mut self, form: &RegisterForm) -> Result<(), AuthError> {
        form.validate()?;
        tracing::info!(email = %form.email, "account created");
        self.email = Some(form.email.trim().to_string());
        Ok(())
    }

    /// Accepts a valid password change. Nothing is stored.
    pub fn change_password(&self, form: &ChangePasswordForm) -> Result<(), AuthError> {
        form.validate()?;
        tracing::info!(email = %form.email, "password changed");
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(email) = self.email.take() {
            tracing::info!(%email, "signed out");
        }
    }
}
