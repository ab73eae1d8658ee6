// models/src/lib.rs

//! Shared types for the LifeTrack client: the four backend entities, their
//! request payloads, and the small amount of validation done before a
//! payload leaves the client.

pub mod dates;
pub mod errors;
pub mod identifiers;
pub mod medical;

pub use errors::{ValidationError, ValidationResult};
pub use identifiers::{Collection, DoctorId, RecordId, TreatmentId, UserId};
pub use medical::*;
