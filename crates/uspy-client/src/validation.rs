use validator::ValidateEmail;

use crate::error::ClientError;

/// Validate email format using the validator crate
pub fn validate_email(email: &str) -> Result<(), ClientError> {
    if email.trim().is_empty() {
        return Err(ClientError::Validation("Email cannot be empty".to_string()));
    }

    if !email.validate_email() {
        return Err(ClientError::Validation("Invalid email format".to_string()));
    }

    Ok(())
}

/// Validate login credentials before sending them
pub fn validate_login(login: &str, password: &str) -> Result<(), ClientError> {
    if login.trim().is_empty() {
        return Err(ClientError::Validation("Login cannot be empty".to_string()));
    }

    if password.is_empty() {
        return Err(ClientError::Validation(
            "Password cannot be empty".to_string(),
        ));
    }

    Ok(())
}
