// models/src/medical/voice.rs

use serde::{Deserialize, Serialize};

use crate::dates;
use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::{DoctorId, RecordId, UserId};
use crate::medical::doctor::NewDoctor;
use crate::medical::health_record::NewHealthRecord;
use crate::medical::treatment::NewTreatment;

/// Request body for both voice parsing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceParseRequest {
    pub text: String,
    pub user_id: UserId,
}

/// Envelope the AI parsing endpoints answer with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceParseResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub parsed_data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Structured health-record draft extracted from a dictated transcript.
/// Every field is optional because the model may miss any of them; the
/// patient reviews and edits the draft before it is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<DoctorId>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub medication: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<String>,
}

impl RecordDraft {
    /// Builds the health record to create. A missing date means today.
    pub fn to_health_record(&self, user_id: UserId) -> ValidationResult<NewHealthRecord> {
        let diagnosis = non_blank(&self.diagnosis).ok_or(ValidationError::MissingDiagnosis)?;
        Ok(NewHealthRecord {
            user_id,
            doctor_id: self.doctor_id,
            diagnosis: diagnosis.to_string(),
            record_date: non_blank(&self.date).map(str::to_string).unwrap_or_else(dates::today),
            file_path: None,
        })
    }

    /// The follow-up treatment, if the draft mentions a medication.
    pub fn to_treatment(&self, record_id: RecordId) -> Option<NewTreatment> {
        let medication = non_blank(&self.medication)?;
        Some(NewTreatment {
            record_id,
            medication: medication.to_string(),
            procedure: Some(self.dosage.clone().unwrap_or_default()),
            follow_up_date: non_blank(&self.follow_up_date).map(str::to_string),
        })
    }
}

/// Structured doctor draft extracted from a dictated transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DoctorDraft {
    /// Name and specialization are mandatory. The parser reports the phone
    /// number as `phone`; the backend column is `contact_number`.
    pub fn to_new_doctor(&self) -> ValidationResult<NewDoctor> {
        let name = non_blank(&self.name).ok_or(ValidationError::IncompleteDoctor)?;
        let specialization = non_blank(&self.specialization).ok_or(ValidationError::IncompleteDoctor)?;
        Ok(NewDoctor {
            name: name.to_string(),
            specialization: Some(specialization.to_string()),
            contact_number: non_blank(&self.phone)
                .or_else(|| non_blank(&self.contact_number))
                .map(str::to_string),
            email: non_blank(&self.email).map(str::to_string),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
