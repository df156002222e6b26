//! Owner check for analysis records.
//!
//! Records are private to the user who submitted them. Callers must confirm
//! the record exists first, so an unknown id reads as NotFound for everyone
//! rather than revealing ownership through a different denial.

use crate::error::CoreError;
use crate::types::DbId;

/// Allow the operation only when `caller_id` owns the record.
pub fn authorize_owner(owner_id: DbId, caller_id: DbId) -> Result<(), CoreError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Not authorized to access this analysis".into(),
        ))
    }
}
