// models/src/identifiers.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned identifiers. The client never mints ids of its own.
pub type UserId = i64;
pub type DoctorId = i64;
pub type RecordId = i64;
pub type TreatmentId = i64;

/// The four REST collections. Used for paths and log lines.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Doctors,
    HealthRecords,
    Treatments,
}

impl Collection {
    /// The collection path on the backend. Treatments live under the
    /// singular `/treatment`.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Users => "/users",
            Collection::Doctors => "/doctors",
            Collection::HealthRecords => "/health_records",
            Collection::Treatments => "/treatment",
        }
    }

    /// The path addressing a single member, e.g. `/doctors/5`.
    pub fn member_path(&self, id: i64) -> String {
        format!("{}/{}", self.path(), id)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Users => "users",
            Collection::Doctors => "doctors",
            Collection::HealthRecords => "health records",
            Collection::Treatments => "treatments",
        };
        write!(f, "{}", name)
    }
}
