/// In-memory entity store
///
/// Arena + index layout: one `BTreeMap<id, record>` per entity plus a
/// `(volunteer_id, shift_id) -> registration id` index. All tables sit behind a
/// single `tokio::sync::RwLock`, so every operation (cascading deletes and
/// reservations included) is atomic with respect to every other.
///
/// Cascades are explicit: deleting a parent walks its children before removing
/// itself.
///
/// ```text
/// delete_organization ─> delete_event ─> delete_job ─> delete_shift ─> registrations
/// delete_volunteer ────────────────────────────────────────────────> registrations
/// ```
///
/// Used by tests and by single-node deployments started with
/// `STORE_BACKEND=memory`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{EntityStore, Reservation, StoreError, StoreResult};
use crate::models::{
    event::{CreateEvent, Event, UpdateEvent},
    job::{CreateJob, Job, UpdateJob},
    organization::{CreateOrganization, Organization},
    shift::{CreateShift, Shift},
    volunteer::{CreateVolunteer, Volunteer},
    volunteer_shift::VolunteerShift,
};

/// Monotonic ID generator, one per table (mirrors BIGSERIAL)
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct Tables {
    organizations: BTreeMap<i64, Organization>,
    events: BTreeMap<i64, Event>,
    jobs: BTreeMap<i64, Job>,
    shifts: BTreeMap<i64, Shift>,
    volunteers: BTreeMap<i64, Volunteer>,
    volunteer_shifts: BTreeMap<i64, VolunteerShift>,

    /// (volunteer_id, shift_id) -> volunteer_shifts key
    by_pair: HashMap<(i64, i64), i64>,

    organization_seq: Sequence,
    event_seq: Sequence,
    job_seq: Sequence,
    shift_seq: Sequence,
    volunteer_seq: Sequence,
    volunteer_shift_seq: Sequence,
}

impl Tables {
    fn remove_organization(&mut self, id: i64) -> bool {
        if self.organizations.remove(&id).is_none() {
            return false;
        }
        let events: Vec<i64> = self
            .events
            .values()
            .filter(|e| e.organization_id == Some(id))
            .map(|e| e.id)
            .collect();
        for event_id in events {
            self.remove_event(event_id);
        }
        true
    }

    fn remove_event(&mut self, id: i64) -> bool {
        if self.events.remove(&id).is_none() {
            return false;
        }
        let jobs: Vec<i64> = self
            .jobs
            .values()
            .filter(|j| j.event_id == id)
            .map(|j| j.id)
            .collect();
        for job_id in jobs {
            self.remove_job(job_id);
        }
        true
    }

    fn remove_job(&mut self, id: i64) -> bool {
        if self.jobs.remove(&id).is_none() {
            return false;
        }
        let shifts: Vec<i64> = self
            .shifts
            .values()
            .filter(|s| s.job_id == id)
            .map(|s| s.id)
            .collect();
        for shift_id in shifts {
            self.remove_shift(shift_id);
        }
        true
    }

    fn remove_shift(&mut self, id: i64) -> bool {
        if self.shifts.remove(&id).is_none() {
            return false;
        }
        self.remove_registrations_where(|vs| vs.shift_id == id);
        true
    }

    fn remove_volunteer(&mut self, id: i64) -> bool {
        if self.volunteers.remove(&id).is_none() {
            return false;
        }
        self.remove_registrations_where(|vs| vs.volunteer_id == id);
        true
    }

    fn remove_registrations_where(&mut self, pred: impl Fn(&VolunteerShift) -> bool) {
        let doomed: Vec<(i64, (i64, i64))> = self
            .volunteer_shifts
            .values()
            .filter(|vs| pred(vs))
            .map(|vs| (vs.id, (vs.volunteer_id, vs.shift_id)))
            .collect();
        for (id, pair) in doomed {
            self.volunteer_shifts.remove(&id);
            self.by_pair.remove(&pair);
        }
    }

    fn count_for_shift(&self, shift_id: i64) -> i64 {
        self.volunteer_shifts
            .values()
            .filter(|vs| vs.shift_id == shift_id)
            .count() as i64
    }

    fn registration(&self, volunteer_id: i64, shift_id: i64) -> Option<&VolunteerShift> {
        self.by_pair
            .get(&(volunteer_id, shift_id))
            .and_then(|id| self.volunteer_shifts.get(id))
    }
}

fn check_dates(start: chrono::NaiveDate, end: chrono::NaiveDate) -> StoreResult<()> {
    if end < start {
        return Err(StoreError::Invalid(format!(
            "end_date {} is before start_date {}",
            end, start
        )));
    }
    Ok(())
}

/// In-memory [`EntityStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_organization(&self, data: CreateOrganization) -> StoreResult<Organization> {
        let mut tables = self.tables.write().await;
        let id = tables.organization_seq.next();
        let organization = Organization {
            id,
            name: data.name,
            address: data.address,
        };
        tables.organizations.insert(id, organization.clone());
        debug!(organization_id = id, "Stored organization");
        Ok(organization)
    }

    async fn get_organization(&self, id: i64) -> StoreResult<Option<Organization>> {
        Ok(self.tables.read().await.organizations.get(&id).cloned())
    }

    async fn list_organizations(&self) -> StoreResult<Vec<Organization>> {
        let tables = self.tables.read().await;
        let mut organizations: Vec<Organization> = tables.organizations.values().cloned().collect();
        organizations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(organizations)
    }

    async fn delete_organization(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_organization(id))
    }

    async fn create_event(&self, data: CreateEvent) -> StoreResult<Event> {
        check_dates(data.start_date, data.end_date)?;

        let mut tables = self.tables.write().await;
        if let Some(organization_id) = data.organization_id {
            if !tables.organizations.contains_key(&organization_id) {
                return Err(StoreError::MissingReference {
                    entity: "organization",
                    id: organization_id,
                });
            }
        }

        let id = tables.event_seq.next();
        let event = Event {
            id,
            name: data.name,
            start_date: data.start_date,
            end_date: data.end_date,
            organization_id: data.organization_id,
        };
        tables.events.insert(id, event.clone());
        debug!(event_id = id, "Stored event");
        Ok(event)
    }

    async fn get_event(&self, id: i64) -> StoreResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn list_events(&self) -> StoreResult<Vec<Event>> {
        let tables = self.tables.read().await;
        let mut events: Vec<Event> = tables.events.values().cloned().collect();
        events.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(events)
    }

    async fn update_event(&self, id: i64, data: UpdateEvent) -> StoreResult<Option<Event>> {
        check_dates(data.start_date, data.end_date)?;

        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&id) {
            return Ok(None);
        }
        if let Some(organization_id) = data.organization_id {
            if !tables.organizations.contains_key(&organization_id) {
                return Err(StoreError::MissingReference {
                    entity: "organization",
                    id: organization_id,
                });
            }
        }

        let event = Event {
            id,
            name: data.name,
            start_date: data.start_date,
            end_date: data.end_date,
            organization_id: data.organization_id,
        };
        tables.events.insert(id, event.clone());
        debug!(event_id = id, "Updated event");
        Ok(Some(event))
    }

    async fn delete_event(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_event(id))
    }

    async fn create_job(&self, data: CreateJob) -> StoreResult<Job> {
        check_dates(data.start_date, data.end_date)?;

        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&data.event_id) {
            return Err(StoreError::MissingReference {
                entity: "event",
                id: data.event_id,
            });
        }

        let id = tables.job_seq.next();
        let job = Job {
            id,
            name: data.name,
            start_date: data.start_date,
            end_date: data.end_date,
            description: data.description,
            event_id: data.event_id,
        };
        tables.jobs.insert(id, job.clone());
        debug!(job_id = id, event_id = job.event_id, "Stored job");
        Ok(job)
    }

    async fn get_job(&self, id: i64) -> StoreResult<Option<Job>> {
        Ok(self.tables.read().await.jobs.get(&id).cloned())
    }

    async fn list_jobs(&self) -> StoreResult<Vec<Job>> {
        let tables = self.tables.read().await;
        let mut jobs: Vec<Job> = tables.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(jobs)
    }

    async fn update_job(&self, id: i64, data: UpdateJob) -> StoreResult<Option<Job>> {
        check_dates(data.start_date, data.end_date)?;

        let mut tables = self.tables.write().await;
        if !tables.jobs.contains_key(&id) {
            return Ok(None);
        }
        if !tables.events.contains_key(&data.event_id) {
            return Err(StoreError::MissingReference {
                entity: "event",
                id: data.event_id,
            });
        }

        let job = Job {
            id,
            name: data.name,
            start_date: data.start_date,
            end_date: data.end_date,
            description: data.description,
            event_id: data.event_id,
        };
        tables.jobs.insert(id, job.clone());
        debug!(job_id = id, event_id = job.event_id, "Updated job");
        Ok(Some(job))
    }

    async fn delete_job(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_job(id))
    }

    async fn create_shift(&self, data: CreateShift) -> StoreResult<Shift> {
        if data.max_volunteers < 0 {
            return Err(StoreError::Invalid(format!(
                "max_volunteers must not be negative (got {})",
                data.max_volunteers
            )));
        }

        let mut tables = self.tables.write().await;
        if !tables.jobs.contains_key(&data.job_id) {
            return Err(StoreError::MissingReference {
                entity: "job",
                id: data.job_id,
            });
        }

        let id = tables.shift_seq.next();
        let shift = Shift {
            id,
            date: data.date,
            start_time: data.start_time,
            end_time: data.end_time,
            max_volunteers: data.max_volunteers,
            job_id: data.job_id,
        };
        tables.shifts.insert(id, shift.clone());
        debug!(shift_id = id, job_id = shift.job_id, "Stored shift");
        Ok(shift)
    }

    async fn get_shift(&self, id: i64) -> StoreResult<Option<Shift>> {
        Ok(self.tables.read().await.shifts.get(&id).cloned())
    }

    async fn list_shifts_by_job(&self, job_id: i64) -> StoreResult<Vec<Shift>> {
        let tables = self.tables.read().await;
        let mut shifts: Vec<Shift> = tables
            .shifts
            .values()
            .filter(|s| s.job_id == job_id)
            .cloned()
            .collect();
        shifts.sort_by_key(|s| s.date);
        Ok(shifts)
    }

    async fn delete_shift(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_shift(id))
    }

    async fn create_volunteer(&self, data: CreateVolunteer) -> StoreResult<Volunteer> {
        let mut tables = self.tables.write().await;
        if tables.volunteers.values().any(|v| v.user_id == data.user_id) {
            return Err(StoreError::Conflict(format!(
                "user {} already has a volunteer profile",
                data.user_id
            )));
        }

        let id = tables.volunteer_seq.next();
        let volunteer = Volunteer {
            id,
            first_name: data.first_name,
            last_name: data.last_name,
            address: data.address,
            city: data.city,
            state: data.state,
            country: data.country,
            phone_number: data.phone_number,
            email: data.email,
            user_id: data.user_id,
        };
        tables.volunteers.insert(id, volunteer.clone());
        debug!(volunteer_id = id, "Stored volunteer");
        Ok(volunteer)
    }

    async fn get_volunteer(&self, id: i64) -> StoreResult<Option<Volunteer>> {
        Ok(self.tables.read().await.volunteers.get(&id).cloned())
    }

    async fn get_volunteer_by_user(&self, user_id: i64) -> StoreResult<Option<Volunteer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .volunteers
            .values()
            .find(|v| v.user_id == user_id)
            .cloned())
    }

    async fn delete_volunteer(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_volunteer(id))
    }

    async fn reserve_shift(&self, volunteer_id: i64, shift_id: i64) -> StoreResult<Reservation> {
        let mut tables = self.tables.write().await;

        let max_volunteers = tables
            .shifts
            .get(&shift_id)
            .map(|s| s.max_volunteers)
            .ok_or(StoreError::MissingReference {
                entity: "shift",
                id: shift_id,
            })?;

        if !tables.volunteers.contains_key(&volunteer_id) {
            return Err(StoreError::MissingReference {
                entity: "volunteer",
                id: volunteer_id,
            });
        }

        if let Some(existing) = tables.registration(volunteer_id, shift_id) {
            return Ok(Reservation::Existing(existing.clone()));
        }

        let registered = tables.count_for_shift(shift_id);
        if registered >= i64::from(max_volunteers) {
            return Ok(Reservation::Full {
                max_volunteers,
                registered,
            });
        }

        let id = tables.volunteer_shift_seq.next();
        let record = VolunteerShift {
            id,
            volunteer_id,
            shift_id,
            created_at: Utc::now(),
        };
        tables.volunteer_shifts.insert(id, record.clone());
        tables.by_pair.insert((volunteer_id, shift_id), id);
        Ok(Reservation::Created(record))
    }

    async fn find_volunteer_shift(
        &self,
        volunteer_id: i64,
        shift_id: i64,
    ) -> StoreResult<Option<VolunteerShift>> {
        let tables = self.tables.read().await;
        Ok(tables.registration(volunteer_id, shift_id).cloned())
    }

    async fn delete_volunteer_shift(&self, volunteer_id: i64, shift_id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.by_pair.remove(&(volunteer_id, shift_id)) {
            Some(id) => {
                tables.volunteer_shifts.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_volunteer_shifts(&self, shift_id: i64) -> StoreResult<i64> {
        Ok(self.tables.read().await.count_for_shift(shift_id))
    }

    async fn list_shifts_for_volunteer(&self, volunteer_id: i64) -> StoreResult<Vec<Shift>> {
        let tables = self.tables.read().await;
        let shift_ids: BTreeSet<i64> = tables
            .volunteer_shifts
            .values()
            .filter(|vs| vs.volunteer_id == volunteer_id)
            .map(|vs| vs.shift_id)
            .collect();
        Ok(shift_ids
            .into_iter()
            .filter_map(|id| tables.shifts.get(&id).cloned())
            .collect())
    }
}
