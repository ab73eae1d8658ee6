// models/src/medical/health_record.rs

use serde::{Deserialize, Serialize};

use crate::identifiers::{DoctorId, RecordId, UserId};

/// One diagnosis entry. `doctor_id` may be null, or point at a doctor that
/// has since been deleted; consumers treat both as "no attending doctor".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub record_id: RecordId,
    pub user_id: UserId,
    #[serde(default)]
    pub doctor_id: Option<DoctorId>,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub record_date: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Body for `POST /health_records` and `PUT /health_records/{id}`.
/// Serializes `doctor_id` and `file_path` as explicit nulls when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHealthRecord {
    pub user_id: UserId,
    pub doctor_id: Option<DoctorId>,
    pub diagnosis: String,
    pub record_date: String,
    pub file_path: Option<String>,
}

impl From<&HealthRecord> for NewHealthRecord {
    fn from(record: &HealthRecord) -> Self {
        NewHealthRecord {
            user_id: record.user_id,
            doctor_id: record.doctor_id,
            diagnosis: record.diagnosis.clone(),
            record_date: record.record_date.clone().unwrap_or_default(),
            file_path: record.file_path.clone(),
        }
    }
}
