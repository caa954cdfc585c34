//! Shared field checks for entity validation

use crate::domain::errors::DomainError;

/// Non-empty (after trimming) and at most `max` characters
pub(crate) fn required(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    bounded(field, Some(value), max)
}

pub(crate) fn bounded(field: &str, value: Option<&str>, max: usize) -> Result<(), DomainError> {
    match value {
        Some(v) if v.chars().count() > max => Err(DomainError::validation(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn email(field: &str, value: Option<&str>) -> Result<(), DomainError> {
    let Some(v) = value else {
        return Ok(());
    };
    bounded(field, Some(v), 120)?;

    let valid = match v.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(DomainError::validation(format!(
            "{} is not a valid email address",
            field
        )));
    }
    Ok(())
}
