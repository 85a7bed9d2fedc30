use std::sync::OnceLock;

use api_types::user::{DEFAULT_ROLE_ID, UserNew};
use regex::Regex;
use thiserror::Error;

use crate::{
    client::Client,
    config::RegisterArgs,
    error::{AppError, Result},
};

const MIN_PASSWORD_LEN: usize = 4;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("first name is required")]
    MissingFirstName,
    #[error("last name is required")]
    MissingLastName,
    #[error("email is required")]
    MissingEmail,
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("the terms and conditions must be accepted")]
    TermsNotAccepted,
}

#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub accepted_terms: bool,
}

#[allow(clippy::expect_used)]
fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,63}$")
            .expect("email pattern compiles")
    })
}

impl RegistrationForm {
    /// Checks every rule in field order and builds the request body.
    pub fn validate(self) -> std::result::Result<UserNew, RegistrationError> {
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            return Err(RegistrationError::MissingFirstName);
        }
        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            return Err(RegistrationError::MissingLastName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(RegistrationError::MissingEmail);
        }
        if !email_pattern().is_match(email) {
            return Err(RegistrationError::InvalidEmail(email.to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort);
        }
        if !self.accepted_terms {
            return Err(RegistrationError::TermsNotAccepted);
        }

        Ok(UserNew {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: self.password,
            role_id: DEFAULT_ROLE_ID,
            points: 0,
        })
    }
}

/// Runs the `register` subcommand.
pub async fn run(client: &Client, args: RegisterArgs) -> Result<()> {
    eprint!("Password: ");
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;

    let form = RegistrationForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password: password.trim_end_matches(['\r', '\n']).to_string(),
        accepted_terms: args.accept_terms,
    };
    let user = form.validate()?;

    match client.user_register(&user).await {
        Ok(()) => {
            tracing::info!(email = %user.email, "user registered");
            println!("Registered {}. You can now sign in.", user.email);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(email = %user.email, "registration failed: {err:?}");
            Err(AppError::Request(err.user_message()))
        }
    }
}
