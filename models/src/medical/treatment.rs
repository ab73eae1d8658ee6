// models/src/medical/treatment.rs

use serde::{Deserialize, Serialize};

use crate::identifiers::{RecordId, TreatmentId};

pub const UNKNOWN_DOCTOR: &str = "Unknown Doctor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub treatment_id: TreatmentId,
    pub record_id: RecordId,
    #[serde(default)]
    pub medication: String,
    #[serde(default)]
    pub procedure: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<String>,
}

/// Body for `POST /treatment` and `PUT /treatment/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTreatment {
    pub record_id: RecordId,
    pub medication: String,
    pub procedure: Option<String>,
    pub follow_up_date: Option<String>,
}

impl From<&Treatment> for NewTreatment {
    fn from(treatment: &Treatment) -> Self {
        NewTreatment {
            record_id: treatment.record_id,
            medication: treatment.medication.clone(),
            procedure: treatment.procedure.clone(),
            follow_up_date: treatment.follow_up_date.clone(),
        }
    }
}

/// A treatment flattened together with its parent record and that record's
/// doctor, as shown on the treatment history screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentHistoryEntry {
    #[serde(flatten)]
    pub treatment: Treatment,
    pub diagnosis: Option<String>,
    pub record_date: Option<String>,
    pub doctor_name: String,
    pub doctor_specialization: Option<String>,
}
