use validator::{Validate, ValidationError};

use crate::errors::AppError;
use crate::utils::password::MIN_PASSWORD_LENGTH;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        let mut err = ValidationError::new("length");
        err.message = Some(format!("must be at least {} characters", MIN_PASSWORD_LENGTH).into());
        return Err(err);
    }
    Ok(())
}

/// Sorts and removes repeated ids so each association is inserted once.
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}
