/// API route handlers, one module per resource
///
/// - `health`: store health check (public)
/// - `organizations`, `events`, `jobs`, `shifts`, `volunteers`: entity endpoints
/// - `registrations`: volunteer shift sign-up and cancellation

pub mod events;
pub mod health;
pub mod jobs;
pub mod organizations;
pub mod registrations;
pub mod shifts;
pub mod volunteers;
