//! Service-level error seam: domain failures plus storage failures.

use thiserror::Error;

use brocante_core::DomainError;

use crate::store::StoreError;

/// Result type returned by the stateful services.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error surfaced by a service operation.
///
/// Domain variants are terminal and returned to the caller verbatim; storage
/// variants are candidates for manual retry by the caller (never retried
/// automatically here, since repeating a checkout risks duplicate orders).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// The domain failure, if this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(e) => Some(e),
            ServiceError::Store(_) => None,
        }
    }
}
