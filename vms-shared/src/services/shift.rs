/// Shift registration engine
///
/// Each (volunteer, shift) pair is either unregistered or registered:
///
/// ```text
///                register
///   Unregistered ─────────> Registered
///        ^                      │
///        └──────────────────────┘
///        cancel_shift_registration
/// ```
///
/// `register` on a registered pair is a no-op that reports the existing
/// record. `cancel_shift_registration` on an unregistered pair fails.
///
/// The capacity and uniqueness checks are made by
/// [`EntityStore::reserve_shift`] in one atomic step. The lookups done here
/// beforehand produce better errors and answer a repeat sign-up without
/// taking the reservation path.
///
/// # Example
///
/// ```no_run
/// use vms_shared::services::shift::{register, Registration};
/// use vms_shared::services::ServiceError;
/// use vms_shared::store::EntityStore;
///
/// # async fn example(store: &dyn EntityStore) -> Result<(), ServiceError> {
/// match register(store, 1, 7).await {
///     Ok(Registration::Created(record)) => println!("Registered ({})", record.id),
///     Ok(Registration::AlreadyRegistered(_)) => println!("Already registered"),
///     Err(ServiceError::CapacityExceeded { .. }) => println!("Shift is full"),
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{ServiceError, ServiceResult};
use crate::models::{shift::Shift, volunteer_shift::VolunteerShift};
use crate::store::{EntityStore, Reservation, StoreError, StoreResult};

/// Outcome of a successful [`register`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A new registration was recorded
    Created(VolunteerShift),

    /// The volunteer was already registered; the existing record is returned
    AlreadyRegistered(VolunteerShift),
}

impl Registration {
    pub fn record(&self) -> &VolunteerShift {
        match self {
            Registration::Created(record) | Registration::AlreadyRegistered(record) => record,
        }
    }

    pub fn into_record(self) -> VolunteerShift {
        match self {
            Registration::Created(record) | Registration::AlreadyRegistered(record) => record,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Registration::Created(_))
    }
}

/// Places taken and left on a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftAvailability {
    pub max_volunteers: i32,
    pub registered: i64,
    pub remaining: i64,
}

impl ShiftAvailability {
    fn new(max_volunteers: i32, registered: i64) -> Self {
        Self {
            max_volunteers,
            registered,
            remaining: (i64::from(max_volunteers) - registered).max(0),
        }
    }

    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }
}

/// Registers a volunteer for a shift
///
/// # Errors
///
/// - [`ServiceError::NotFound`] if the volunteer or the shift does not exist
/// - [`ServiceError::CapacityExceeded`] if the shift already holds
///   `max_volunteers` registrations
pub async fn register(
    store: &dyn EntityStore,
    volunteer_id: i64,
    shift_id: i64,
) -> ServiceResult<Registration> {
    if store.get_volunteer(volunteer_id).await?.is_none() {
        warn!(volunteer_id, shift_id, "Registration for unknown volunteer");
        return Err(ServiceError::not_found("volunteer", volunteer_id));
    }
    if store.get_shift(shift_id).await?.is_none() {
        warn!(volunteer_id, shift_id, "Registration for unknown shift");
        return Err(ServiceError::not_found("shift", shift_id));
    }

    if let Some(record) = store.find_volunteer_shift(volunteer_id, shift_id).await? {
        debug!(volunteer_id, shift_id, "Volunteer already registered");
        return Ok(Registration::AlreadyRegistered(record));
    }

    let reservation = match store.reserve_shift(volunteer_id, shift_id).await {
        Ok(reservation) => reservation,
        // The volunteer or shift was deleted after the lookups above
        Err(StoreError::MissingReference { entity, id }) => {
            return Err(ServiceError::not_found(entity, id));
        }
        Err(e) => return Err(e.into()),
    };

    match reservation {
        Reservation::Created(record) => {
            info!(
                volunteer_id,
                shift_id,
                registration_id = record.id,
                "Volunteer registered for shift"
            );
            Ok(Registration::Created(record))
        }
        Reservation::Existing(record) => Ok(Registration::AlreadyRegistered(record)),
        Reservation::Full {
            max_volunteers,
            registered,
        } => {
            warn!(
                volunteer_id,
                shift_id, max_volunteers, registered, "Shift is full"
            );
            Err(ServiceError::CapacityExceeded {
                shift_id,
                max_volunteers,
            })
        }
    }
}

/// Removes a volunteer's registration for a shift
///
/// # Errors
///
/// [`ServiceError::NotFound`] if the volunteer holds no registration for the
/// shift, including when either side does not exist.
pub async fn cancel_shift_registration(
    store: &dyn EntityStore,
    volunteer_id: i64,
    shift_id: i64,
) -> ServiceResult<()> {
    if !store.delete_volunteer_shift(volunteer_id, shift_id).await? {
        warn!(volunteer_id, shift_id, "No registration to cancel");
        return Err(ServiceError::NotFound {
            entity: "registration",
            id: shift_id,
        });
    }

    info!(volunteer_id, shift_id, "Shift registration cancelled");
    Ok(())
}

pub async fn is_signed_up(
    store: &dyn EntityStore,
    volunteer_id: i64,
    shift_id: i64,
) -> StoreResult<bool> {
    Ok(store
        .find_volunteer_shift(volunteer_id, shift_id)
        .await?
        .is_some())
}

/// Returns the registration record for a (volunteer, shift) pair
///
/// # Errors
///
/// [`ServiceError::NotFound`] if the pair is not registered.
pub async fn get_volunteer_shift_by_id(
    store: &dyn EntityStore,
    volunteer_id: i64,
    shift_id: i64,
) -> ServiceResult<VolunteerShift> {
    store
        .find_volunteer_shift(volunteer_id, shift_id)
        .await?
        .ok_or(ServiceError::NotFound {
            entity: "registration",
            id: shift_id,
        })
}

/// Shifts the volunteer is registered for, each once, by shift ID
pub async fn get_shifts_signed_up_for(
    store: &dyn EntityStore,
    volunteer_id: i64,
) -> StoreResult<Vec<Shift>> {
    store.list_shifts_for_volunteer(volunteer_id).await
}

/// A job's shifts, earliest date first; same-day shifts keep creation order
pub async fn get_shifts_ordered_by_date(
    store: &dyn EntityStore,
    job_id: i64,
) -> StoreResult<Vec<Shift>> {
    store.list_shifts_by_job(job_id).await
}

/// Deletes a shift and its registrations; false if it did not exist
pub async fn delete_shift(store: &dyn EntityStore, shift_id: i64) -> StoreResult<bool> {
    let deleted = store.delete_shift(shift_id).await?;
    if deleted {
        info!(shift_id, "Deleted shift");
    }
    Ok(deleted)
}

pub async fn get_shift_by_id(store: &dyn EntityStore, shift_id: i64) -> StoreResult<Option<Shift>> {
    store.get_shift(shift_id).await
}

/// Current capacity usage of a shift, or `None` if it does not exist
pub async fn get_shift_availability(
    store: &dyn EntityStore,
    shift_id: i64,
) -> StoreResult<Option<ShiftAvailability>> {
    let Some(shift) = store.get_shift(shift_id).await? else {
        return Ok(None);
    };
    let registered = store.count_volunteer_shifts(shift_id).await?;
    Ok(Some(ShiftAvailability::new(shift.max_volunteers, registered)))
}
