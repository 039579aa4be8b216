use crate::error::AppError;

/// Minimum length, in characters, of usernames and passwords.
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// Returns the trimmed value if it is present and non-blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validate that a like count is not negative.
pub fn validate_likes(likes: i64) -> Result<(), AppError> {
    if likes < 0 {
        return Err(AppError::Validation("likes must be >= 0".into()));
    }
    Ok(())
}

/// Validate that `value` has at least `MIN_CREDENTIAL_LEN` characters.
pub fn validate_min_len(value: &str, field: &str) -> Result<(), AppError> {
    if value.chars().count() < MIN_CREDENTIAL_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at least {MIN_CREDENTIAL_LEN} characters long"
        )));
    }
    Ok(())
}
