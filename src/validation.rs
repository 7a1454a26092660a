//! Invariant checks for parsed CAS responses (outcome, semantics).

pub mod outcome;
pub mod semantics;

use crate::error::{CasError, Result};
use crate::types::CasResponse;

pub use outcome::validate_outcome;
pub use semantics::validate_response_semantics;

/// Validates the structural invariants of a [`CasResponse`].
///
/// This is the main entry point for response validation. It sequentially calls:
/// 1. Outcome validation (`validate_outcome`): exactly one of the success or
///    failure field groups is populated.
/// 2. Semantic validation (`validate_response_semantics`): every populated
///    field is one the response variant can carry.
///
/// # Arguments
/// * `response`: The [`CasResponse`] to validate.
///
/// # Returns
/// * `Ok(())` if the response passes all validation stages.
/// * `Err(CasError::ValidationError)` wrapping the specific error from the failed stage.
pub fn validate_response(response: &CasResponse) -> Result<()> {
    // Stage 1: Outcome
    validate_outcome(response).map_err(|e| {
        CasError::ValidationError { stage: "Outcome".to_string(), source: Box::new(e) }
    })?;

    // Stage 2: Semantics
    validate_response_semantics(response).map_err(|e| {
        CasError::ValidationError { stage: "Semantics".to_string(), source: Box::new(e) }
    })?;

    Ok(())
}
