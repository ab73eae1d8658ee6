// cli/src/cli/display.rs

// Plain-text rendering of entities and views. Colour is applied by the
// handlers around these lines, never inside them.

use lifetrack_lib::aggregator::record_with_doctor;
use lifetrack_lib::{HomeSummary, SystemCounts};
use models::{
    Doctor, DoctorDraft, HealthInsights, HealthRecord, PublicUser, RecordDraft, Treatment, TreatmentHistoryEntry,
    UNKNOWN_DOCTOR,
};

const NOT_SET: &str = "-";

fn or_unset(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(NOT_SET)
}

pub fn format_user(user: &PublicUser) -> String {
    let age = user.age.map_or_else(|| NOT_SET.to_string(), |age| age.to_string());
    format!(
        "#{} {} <{}>, age {}, {}, {}",
        user.user_id,
        user.name,
        user.email,
        age,
        or_unset(user.gender.as_deref()),
        or_unset(user.contact_number.as_deref())
    )
}

pub fn format_doctor(doctor: &Doctor) -> String {
    format!(
        "#{} {} ({}) phone {} email {}",
        doctor.doctor_id,
        doctor.name,
        or_unset(doctor.specialization.as_deref()),
        or_unset(doctor.contact_number.as_deref()),
        or_unset(doctor.email.as_deref())
    )
}

/// One record line, labelled with its attending doctor when that doctor
/// still exists.
pub fn format_record(record: &HealthRecord, doctors: &[Doctor]) -> String {
    let doctor = record_with_doctor(record, doctors).map_or(UNKNOWN_DOCTOR, |d| d.name.as_str());
    let mut line = format!(
        "#{} {} {} with {}",
        record.record_id,
        or_unset(record.record_date.as_deref()),
        record.diagnosis,
        doctor
    );
    if let Some(file_path) = record.file_path.as_deref().filter(|p| !p.is_empty()) {
        line.push_str(&format!(" [{}]", file_path));
    }
    line
}

pub fn format_treatment(treatment: &Treatment) -> String {
    format!(
        "#{} {} {} (record #{}) follow-up {}",
        treatment.treatment_id,
        treatment.medication,
        or_unset(treatment.procedure.as_deref()),
        treatment.record_id,
        or_unset(treatment.follow_up_date.as_deref())
    )
}

pub fn format_history_entry(entry: &TreatmentHistoryEntry) -> String {
    let doctor = match entry.doctor_specialization.as_deref() {
        Some(specialization) if !specialization.is_empty() => format!("{} ({})", entry.doctor_name, specialization),
        _ => entry.doctor_name.clone(),
    };
    format!(
        "{} {} for {}, {} by {}, follow-up {}",
        or_unset(entry.record_date.as_deref()),
        entry.treatment.medication,
        or_unset(entry.diagnosis.as_deref()),
        or_unset(entry.treatment.procedure.as_deref()),
        doctor,
        or_unset(entry.treatment.follow_up_date.as_deref())
    )
}

pub fn summary_lines(summary: &HomeSummary) -> Vec<String> {
    vec![
        format!("Doctors visited:  {}", summary.visited_doctors),
        format!("Health records:   {}", summary.total_records),
        format!("Treatments:       {}", summary.total_treatments),
        format!("Recent activity:  {}", summary.recent_activity),
    ]
}

pub fn count_lines(counts: &SystemCounts) -> Vec<String> {
    vec![
        format!("Users:           {}", counts.users),
        format!("Doctors:         {}", counts.doctors),
        format!("Health records:  {}", counts.health_records),
        format!("Treatments:      {}", counts.treatments),
    ]
}

pub fn insight_lines(insights: &HealthInsights) -> Vec<String> {
    let mut lines = vec![insights.summary.clone()];
    if !insights.trends.is_empty() {
        lines.push(String::new());
        lines.push("Trends:".to_string());
        lines.extend(insights.trends.iter().map(|trend| format!("  * {}", trend)));
    }
    if !insights.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations:".to_string());
        lines.extend(insights.recommendations.iter().map(|tip| format!("  * {}", tip)));
    }
    let stats = &insights.statistics;
    lines.push(String::new());
    lines.push(format!(
        "Records {}, doctors {}, treatments {}",
        stats.total_records, stats.total_doctors, stats.total_treatments
    ));
    if let Some(recent) = stats.recent_visits {
        lines.push(format!("Visits in the last 30 days: {}", recent));
    }
    lines
}

pub fn record_draft_lines(draft: &RecordDraft) -> Vec<String> {
    let doctor = match (draft.doctor_name.as_deref(), draft.doctor_id) {
        (Some(name), Some(id)) => format!("{} (#{})", name, id),
        (Some(name), None) => format!("{} (not in your doctor list)", name),
        (None, Some(id)) => format!("#{}", id),
        (None, None) => NOT_SET.to_string(),
    };
    vec![
        format!("Diagnosis:   {}", or_unset(draft.diagnosis.as_deref())),
        format!("Doctor:      {}", doctor),
        format!("Date:        {}", or_unset(draft.date.as_deref())),
        format!("Medication:  {}", or_unset(draft.medication.as_deref())),
        format!("Dosage:      {}", or_unset(draft.dosage.as_deref())),
        format!("Follow-up:   {}", or_unset(draft.follow_up_date.as_deref())),
    ]
}

pub fn doctor_draft_lines(draft: &DoctorDraft) -> Vec<String> {
    let phone = draft.phone.as_deref().or(draft.contact_number.as_deref());
    vec![
        format!("Name:            {}", or_unset(draft.name.as_deref())),
        format!("Specialization:  {}", or_unset(draft.specialization.as_deref())),
        format!("Phone:           {}", or_unset(phone)),
        format!("Email:           {}", or_unset(draft.email.as_deref())),
        format!("Address:         {}", or_unset(draft.address.as_deref())),
        format!("Notes:           {}", or_unset(draft.notes.as_deref())),
    ]
}
