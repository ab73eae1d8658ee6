// lib/src/aggregator.rs

//! Relational views over the flat collections the backend serves.
//!
//! The REST API has no join or filter endpoints, so every screen fetches the
//! whole collections it needs and calls one of these functions to rebuild
//! the per-patient view. They are pure: no I/O, no caching, inputs are
//! never modified. A `doctor_id` that is null or points at a deleted doctor
//! simply joins to nothing.

use std::collections::HashSet;

use serde::Serialize;

use models::dates::newest_first;
use models::{
    Doctor, DoctorId, HealthRecord, RecordId, Treatment, TreatmentHistoryEntry, UserId, UNKNOWN_DOCTOR,
};

const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Doctors that appear on at least one of the user's records.
pub fn doctors_visited_by_user(doctors: &[Doctor], records: &[HealthRecord], user_id: UserId) -> Vec<Doctor> {
    let visited: HashSet<DoctorId> = records
        .iter()
        .filter(|record| record.user_id == user_id)
        .filter_map(|record| record.doctor_id)
        .collect();

    doctors
        .iter()
        .filter(|doctor| visited.contains(&doctor.doctor_id))
        .cloned()
        .collect()
}

/// The user's records, most recent first. Ties and unreadable dates keep
/// their fetch order, with unreadable dates last.
pub fn user_health_records(records: &[HealthRecord], user_id: UserId) -> Vec<HealthRecord> {
    let mut owned: Vec<HealthRecord> = records.iter().filter(|record| record.user_id == user_id).cloned().collect();
    owned.sort_by(|a, b| newest_first(a.record_date.as_deref(), b.record_date.as_deref()));
    owned
}

/// Treatments hanging off any of the user's records.
pub fn user_treatments(treatments: &[Treatment], records: &[HealthRecord], user_id: UserId) -> Vec<Treatment> {
    let owned = record_ids_of(records, user_id);
    treatments
        .iter()
        .filter(|treatment| owned.contains(&treatment.record_id))
        .cloned()
        .collect()
}

/// The user's treatments with diagnosis, date and doctor pulled in from the
/// parent record, most recent first.
pub fn user_treatment_history(
    treatments: &[Treatment],
    records: &[HealthRecord],
    doctors: &[Doctor],
    user_id: UserId,
) -> Vec<TreatmentHistoryEntry> {
    let owned: Vec<&HealthRecord> = records.iter().filter(|record| record.user_id == user_id).collect();

    let mut history: Vec<TreatmentHistoryEntry> = treatments
        .iter()
        .filter_map(|treatment| {
            let record = owned.iter().find(|record| record.record_id == treatment.record_id)?;
            let doctor = record_with_doctor(record, doctors);
            Some(TreatmentHistoryEntry {
                treatment: treatment.clone(),
                diagnosis: Some(record.diagnosis.clone()),
                record_date: record.record_date.clone(),
                doctor_name: doctor.map_or_else(|| UNKNOWN_DOCTOR.to_string(), |d| d.name.clone()),
                doctor_specialization: doctor.and_then(|d| d.specialization.clone()),
            })
        })
        .collect();

    history.sort_by(|a, b| newest_first(a.record_date.as_deref(), b.record_date.as_deref()));
    history
}

/// The attending doctor of a record. `None` means "no attending doctor".
pub fn record_with_doctor<'a>(record: &HealthRecord, doctors: &'a [Doctor]) -> Option<&'a Doctor> {
    let doctor_id = record.doctor_id?;
    doctors.iter().find(|doctor| doctor.doctor_id == doctor_id)
}

/// Counters and recent records for the home screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeSummary {
    pub visited_doctors: usize,
    pub total_records: usize,
    pub total_treatments: usize,
    pub recent_activity: usize,
    pub recent_records: Vec<HealthRecord>,
}

pub fn home_summary(
    records: &[HealthRecord],
    treatments: &[Treatment],
    doctors: &[Doctor],
    user_id: UserId,
) -> HomeSummary {
    let user_records = user_health_records(records, user_id);
    let recent_records: Vec<HealthRecord> = user_records.iter().take(RECENT_ACTIVITY_LIMIT).cloned().collect();
    HomeSummary {
        visited_doctors: doctors_visited_by_user(doctors, records, user_id).len(),
        total_records: user_records.len(),
        total_treatments: user_treatments(treatments, records, user_id).len(),
        recent_activity: recent_records.len(),
        recent_records,
    }
}

fn record_ids_of(records: &[HealthRecord], user_id: UserId) -> HashSet<RecordId> {
    records
        .iter()
        .filter(|record| record.user_id == user_id)
        .map(|record| record.record_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(id: DoctorId, name: &str) -> Doctor {
        Doctor {
            doctor_id: id,
            name: name.to_string(),
            specialization: Some("General Practice".to_string()),
            contact_number: None,
            email: None,
        }
    }

    fn record(id: RecordId, user: UserId, doctor: Option<DoctorId>, date: &str) -> HealthRecord {
        HealthRecord {
            record_id: id,
            user_id: user,
            doctor_id: doctor,
            diagnosis: format!("diagnosis {}", id),
            record_date: Some(date.to_string()),
            file_path: None,
        }
    }

    fn treatment(id: i64, record_id: RecordId) -> Treatment {
        Treatment {
            treatment_id: id,
            record_id,
            medication: format!("med {}", id),
            procedure: None,
            follow_up_date: None,
        }
    }

    #[test]
    fn user_without_records_visited_nobody() {
        let doctors = vec![doctor(5, "Dr. Lee")];
        let records = vec![record(10, 2, Some(5), "2025-01-01")];
        assert!(doctors_visited_by_user(&doctors, &records, 1).is_empty());
        assert!(doctors_visited_by_user(&doctors, &[], 1).is_empty());
    }

    #[test]
    fn dangling_doctor_ids_are_dropped() {
        let doctors = vec![doctor(5, "Dr. Lee")];
        let records = vec![
            record(10, 1, Some(5), "2025-01-01"),
            record(11, 1, Some(99), "2025-02-01"),
            record(12, 1, Some(5), "2025-03-01"),
            record(13, 1, None, "2025-04-01"),
        ];
        let visited = doctors_visited_by_user(&doctors, &records, 1);
        assert_eq!(visited, vec![doctor(5, "Dr. Lee")]);
    }

    #[test]
    fn missing_doctor_joins_to_nothing() {
        let doctors = vec![doctor(5, "Dr. Lee")];
        assert!(record_with_doctor(&record(11, 1, Some(99), "2025-01-01"), &doctors).is_none());
        assert!(record_with_doctor(&record(12, 1, None, "2025-01-01"), &doctors).is_none());
        assert_eq!(
            record_with_doctor(&record(10, 1, Some(5), "2025-01-01"), &doctors).map(|d| d.doctor_id),
            Some(5)
        );
    }

    #[test]
    fn user_records_are_newest_first() {
        let records = vec![
            record(1, 1, None, "2024-03-01"),
            record(2, 2, None, "2026-01-01"),
            record(3, 1, None, "not a date"),
            record(4, 1, None, "2025-07-19"),
            record(5, 1, None, "2024-12-31"),
        ];
        let ids: Vec<RecordId> = user_health_records(&records, 1).iter().map(|r| r.record_id).collect();
        assert_eq!(ids, vec![4, 5, 1, 3]);
    }

    #[test]
    fn equal_dates_keep_fetch_order() {
        let records = vec![
            record(7, 1, None, "2025-01-01"),
            record(3, 1, None, "2025-01-01"),
            record(5, 1, None, "2025-01-01"),
        ];
        let ids: Vec<RecordId> = user_health_records(&records, 1).iter().map(|r| r.record_id).collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }

    #[test]
    fn treatments_follow_record_ownership() {
        let records = vec![record(10, 1, None, "2025-01-01"), record(20, 2, None, "2025-01-01")];
        let treatments = vec![treatment(100, 10), treatment(200, 20), treatment(300, 30)];
        let mine: Vec<i64> = user_treatments(&treatments, &records, 1).iter().map(|t| t.treatment_id).collect();
        assert_eq!(mine, vec![100]);
    }

    #[test]
    fn history_is_enriched_and_scoped_to_the_user() {
        let doctors = vec![doctor(5, "Dr. Lee")];
        let records = vec![
            record(10, 1, Some(5), "2025-01-01"),
            record(11, 1, Some(99), "2025-06-01"),
            record(20, 2, Some(5), "2025-09-01"),
        ];
        let treatments = vec![treatment(100, 10), treatment(101, 11), treatment(200, 20)];

        let history = user_treatment_history(&treatments, &records, &doctors, 1);
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|entry| entry.treatment.record_id != 20));

        assert_eq!(history[0].treatment.treatment_id, 101);
        assert_eq!(history[0].doctor_name, UNKNOWN_DOCTOR);
        assert_eq!(history[0].doctor_specialization, None);
        assert_eq!(history[0].record_date.as_deref(), Some("2025-06-01"));

        assert_eq!(history[1].treatment.treatment_id, 100);
        assert_eq!(history[1].doctor_name, "Dr. Lee");
        assert_eq!(history[1].diagnosis.as_deref(), Some("diagnosis 10"));
        assert_eq!(history[1].doctor_specialization.as_deref(), Some("General Practice"));
    }

    #[test]
    fn home_summary_counts_and_caps_recent_records() {
        let doctors = vec![doctor(5, "Dr. Lee"), doctor(6, "Dr. Okafor")];
        let records: Vec<HealthRecord> = (1..=7)
            .map(|i| record(i, 1, Some(5), &format!("2025-0{}-01", i)))
            .chain(std::iter::once(record(50, 2, Some(6), "2025-01-01")))
            .collect();
        let treatments = vec![treatment(1, 1), treatment(2, 2), treatment(3, 50)];

        let summary = home_summary(&records, &treatments, &doctors, 1);
        assert_eq!(summary.visited_doctors, 1);
        assert_eq!(summary.total_records, 7);
        assert_eq!(summary.total_treatments, 2);
        assert_eq!(summary.recent_activity, 5);
        assert_eq!(summary.recent_records[0].record_id, 7);
    }
}
