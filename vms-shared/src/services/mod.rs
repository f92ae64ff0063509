/// Domain services
///
/// Plain async functions over `&dyn EntityStore`. Lookups answer with
/// `Option`; registration mutations fail with a typed [`ServiceError`].
///
/// - `organization`, `event`, `job`, `volunteer`: fetch, ordered listing, delete
/// - `shift`: the registration engine (register, cancel, queries)

pub mod event;
pub mod job;
pub mod organization;
pub mod shift;
pub mod volunteer;

use crate::store::StoreError;

/// Result alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type for service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A referenced volunteer, shift or registration does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The shift already holds `max_volunteers` registrations
    #[error("shift {shift_id} is full ({max_volunteers} volunteers)")]
    CapacityExceeded { shift_id: i64, max_volunteers: i32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }
}
