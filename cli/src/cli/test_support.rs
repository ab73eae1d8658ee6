// cli/src/cli/test_support.rs

// In-memory backend for handler and chat tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use lifetrack_lib::{HealthBackend, PhrError, Result};
use models::{
    BackendStatus, ChatReply, Doctor, DoctorDraft, DoctorId, HealthRecord, InsightsResponse, MutationAck, NewDoctor,
    NewHealthRecord, NewTreatment, NewUser, PublicUser, RecordDraft, RecordId, Treatment, TreatmentId, User, UserId,
    VoiceParseResponse,
};

/// Chat messages starting with this word are answered after a delay.
pub const SLOW_PREFIX: &str = "slow";
/// Chat messages starting with this word fail.
pub const FAILING_PREFIX: &str = "fail";

#[derive(Default)]
pub struct FakeBackend {
    pub doctors: Vec<Doctor>,
    pub records: Vec<HealthRecord>,
    pub treatments: Vec<Treatment>,
    /// `fetch_doctors` fails once this many calls have succeeded.
    pub doctor_fetch_limit: Option<usize>,
    pub doctor_fetches: AtomicUsize,
    pub deleted_treatments: Mutex<Vec<TreatmentId>>,
}

impl FakeBackend {
    /// Two patients: user 1 owns record 10 and treatment 100, user 2 owns
    /// record 20 and treatment 200.
    pub fn two_patients() -> Self {
        FakeBackend {
            doctors: vec![Doctor {
                doctor_id: 5,
                name: "Dr. Lee".to_string(),
                specialization: Some("Cardiology".to_string()),
                contact_number: None,
                email: None,
            }],
            records: vec![record(10, 1), record(20, 2)],
            treatments: vec![treatment(100, 10), treatment(200, 20)],
            ..FakeBackend::default()
        }
    }

    pub fn deleted(&self) -> Vec<TreatmentId> {
        self.deleted_treatments.lock().unwrap().clone()
    }
}

fn record(record_id: RecordId, user_id: UserId) -> HealthRecord {
    HealthRecord {
        record_id,
        user_id,
        doctor_id: Some(5),
        diagnosis: "Hypertension".to_string(),
        record_date: Some("2025-03-01".to_string()),
        file_path: None,
    }
}

fn treatment(treatment_id: TreatmentId, record_id: RecordId) -> Treatment {
    Treatment {
        treatment_id,
        record_id,
        medication: "Lisinopril".to_string(),
        procedure: None,
        follow_up_date: None,
    }
}

pub fn patient(user_id: UserId) -> PublicUser {
    PublicUser {
        user_id,
        name: format!("Patient {}", user_id),
        age: Some(40),
        gender: None,
        contact_number: None,
        email: format!("patient{}@example.com", user_id),
    }
}

fn unsupported<T>() -> Result<T> {
    Err(PhrError::request("not supported by the fake backend"))
}

#[async_trait]
impl HealthBackend for FakeBackend {
    async fn health_check(&self) -> Result<BackendStatus> {
        Ok(BackendStatus { status: "healthy".to_string(), ..BackendStatus::default() })
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        unsupported()
    }

    async fn register(&self, _user: &NewUser) -> Result<MutationAck> {
        unsupported()
    }

    async fn fetch_doctors(&self) -> Result<Vec<Doctor>> {
        let served = self.doctor_fetches.fetch_add(1, Ordering::SeqCst);
        match self.doctor_fetch_limit {
            Some(limit) if served >= limit => Err(PhrError::request("Failed to fetch doctors")),
            _ => Ok(self.doctors.clone()),
        }
    }

    async fn add_doctor(&self, _doctor: &NewDoctor) -> Result<MutationAck> {
        unsupported()
    }

    async fn update_doctor(&self, _doctor_id: DoctorId, _doctor: &NewDoctor) -> Result<MutationAck> {
        unsupported()
    }

    async fn delete_doctor(&self, _doctor_id: DoctorId) -> Result<MutationAck> {
        unsupported()
    }

    async fn fetch_health_records(&self) -> Result<Vec<HealthRecord>> {
        Ok(self.records.clone())
    }

    async fn add_health_record(&self, _record: &NewHealthRecord) -> Result<MutationAck> {
        unsupported()
    }

    async fn update_health_record(&self, _record_id: RecordId, _record: &NewHealthRecord) -> Result<MutationAck> {
        unsupported()
    }

    async fn delete_health_record(&self, _record_id: RecordId) -> Result<MutationAck> {
        unsupported()
    }

    async fn fetch_treatments(&self) -> Result<Vec<Treatment>> {
        Ok(self.treatments.clone())
    }

    async fn add_treatment(&self, _treatment: &NewTreatment) -> Result<MutationAck> {
        unsupported()
    }

    async fn update_treatment(&self, _treatment_id: TreatmentId, _treatment: &NewTreatment) -> Result<MutationAck> {
        unsupported()
    }

    async fn delete_treatment(&self, treatment_id: TreatmentId) -> Result<MutationAck> {
        self.deleted_treatments.lock().unwrap().push(treatment_id);
        Ok(MutationAck::default())
    }

    async fn health_insights(&self, _user_id: UserId) -> Result<InsightsResponse> {
        unsupported()
    }

    async fn parse_voice_record(&self, _text: &str, _user_id: UserId) -> Result<VoiceParseResponse<RecordDraft>> {
        unsupported()
    }

    async fn parse_voice_doctor(&self, _text: &str, _user_id: UserId) -> Result<VoiceParseResponse<DoctorDraft>> {
        unsupported()
    }

    async fn chat(&self, _user_id: UserId, message: &str) -> Result<ChatReply> {
        if message.starts_with(FAILING_PREFIX) {
            return Err(PhrError::request("Failed to reach the health assistant"));
        }
        if message.starts_with(SLOW_PREFIX) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        Ok(ChatReply { response: format!("re: {}", message), ..ChatReply::default() })
    }
}
