// cli/src/cli/forms.rs

// Turns command-line fields into request payloads. On add the fields must
// form a complete entity; on update they are laid over the stored one.

use models::dates::{parse_record_date, today};
use models::{
    Doctor, HealthRecord, NewDoctor, NewHealthRecord, NewTreatment, Treatment, UserId, ValidationError,
    ValidationResult,
};

use crate::cli::commands::{DoctorFields, RecordFields, TreatmentFields};

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Accepts any date the record listing can sort; rejects the rest.
pub fn checked_date(raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    match parse_record_date(trimmed) {
        Some(_) => Ok(trimmed.to_string()),
        None => Err(ValidationError::InvalidDateFormat(trimmed.to_string())),
    }
}

fn checked_optional_date(raw: &Option<String>) -> ValidationResult<Option<String>> {
    non_blank(raw).map(|date| checked_date(&date)).transpose()
}

pub fn new_doctor(fields: &DoctorFields) -> ValidationResult<NewDoctor> {
    let name = non_blank(&fields.name).ok_or(ValidationError::Required("Name"))?;
    Ok(NewDoctor {
        name,
        specialization: non_blank(&fields.specialization),
        contact_number: non_blank(&fields.contact_number),
        email: non_blank(&fields.email),
    })
}

pub fn updated_doctor(existing: &Doctor, fields: &DoctorFields) -> NewDoctor {
    let mut doctor = NewDoctor::from(existing);
    if let Some(name) = non_blank(&fields.name) {
        doctor.name = name;
    }
    if let Some(specialization) = non_blank(&fields.specialization) {
        doctor.specialization = Some(specialization);
    }
    if let Some(contact_number) = non_blank(&fields.contact_number) {
        doctor.contact_number = Some(contact_number);
    }
    if let Some(email) = non_blank(&fields.email) {
        doctor.email = Some(email);
    }
    doctor
}

pub fn new_health_record(fields: &RecordFields, user_id: UserId) -> ValidationResult<NewHealthRecord> {
    let diagnosis = non_blank(&fields.diagnosis).ok_or(ValidationError::MissingDiagnosis)?;
    Ok(NewHealthRecord {
        user_id,
        doctor_id: fields.doctor_id,
        diagnosis,
        record_date: checked_optional_date(&fields.date)?.unwrap_or_else(today),
        file_path: non_blank(&fields.file_path),
    })
}

pub fn updated_health_record(existing: &HealthRecord, fields: &RecordFields) -> ValidationResult<NewHealthRecord> {
    let mut record = NewHealthRecord::from(existing);
    if let Some(diagnosis) = non_blank(&fields.diagnosis) {
        record.diagnosis = diagnosis;
    }
    if fields.doctor_id.is_some() {
        record.doctor_id = fields.doctor_id;
    }
    if let Some(date) = checked_optional_date(&fields.date)? {
        record.record_date = date;
    }
    if let Some(file_path) = non_blank(&fields.file_path) {
        record.file_path = Some(file_path);
    }
    Ok(record)
}

pub fn new_treatment(fields: &TreatmentFields) -> ValidationResult<NewTreatment> {
    let record_id = fields.record_id.ok_or(ValidationError::Required("Health record"))?;
    let medication = non_blank(&fields.medication).ok_or(ValidationError::Required("Medication"))?;
    Ok(NewTreatment {
        record_id,
        medication,
        procedure: non_blank(&fields.procedure),
        follow_up_date: checked_optional_date(&fields.follow_up_date)?,
    })
}

pub fn updated_treatment(existing: &Treatment, fields: &TreatmentFields) -> ValidationResult<NewTreatment> {
    let mut treatment = NewTreatment::from(existing);
    if let Some(record_id) = fields.record_id {
        treatment.record_id = record_id;
    }
    if let Some(medication) = non_blank(&fields.medication) {
        treatment.medication = medication;
    }
    if let Some(procedure) = non_blank(&fields.procedure) {
        treatment.procedure = Some(procedure);
    }
    if let Some(date) = checked_optional_date(&fields.follow_up_date)? {
        treatment.follow_up_date = Some(date);
    }
    Ok(treatment)
}

/// `y` or `yes`, any case. Everything else, including an empty answer, is no.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
