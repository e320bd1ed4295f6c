//! Rules for user ids, usernames and passwords

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID must be 1 to {0} characters long")]
    IdLength(usize),

    #[error("User ID must start and end with a letter or number")]
    IdEdge,

    #[error("User ID contains invalid character: '{0}'. Only alphanumeric characters and single hyphens are allowed")]
    IdCharacter(char),

    #[error("Username must be {0} to {1} characters long")]
    UsernameLength(usize, usize),

    #[error("Username contains invalid character: '{0}'. Only alphanumeric characters, underscores, and hyphens are allowed")]
    UsernameCharacter(char),

    #[error("Password must be {0} to {1} characters long")]
    PasswordLength(usize, usize),
}

const MAX_USER_ID_LENGTH: usize = 50;
const USERNAME_LENGTH: (usize, usize) = (3, 50);
const PASSWORD_LENGTH: (usize, usize) = (8, 128);

/// Alphanumerics and hyphens, alphanumeric at both ends, no `--`
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() || id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdLength(MAX_USER_ID_LENGTH));
    }

    let starts_ok = id.starts_with(|c: char| c.is_ascii_alphanumeric());
    let ends_ok = id.ends_with(|c: char| c.is_ascii_alphanumeric());

    if !starts_ok || !ends_ok {
        return Err(UserValidationError::IdEdge);
    }

    if let Some(c) = id.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        return Err(UserValidationError::IdCharacter(c));
    }

    if id.contains("--") {
        return Err(UserValidationError::IdCharacter('-'));
    }

    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    let (min, max) = USERNAME_LENGTH;

    if username.len() < min || username.len() > max {
        return Err(UserValidationError::UsernameLength(min, max));
    }

    match username
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '-')
    {
        Some(c) => Err(UserValidationError::UsernameCharacter(c)),
        None => Ok(()),
    }
}

pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    let (min, max) = PASSWORD_LENGTH;
    let len = password.chars().count();

    if len < min || len > max {
        return Err(UserValidationError::PasswordLength(min, max));
    }

    Ok(())
}
