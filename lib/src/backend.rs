// lib/src/backend.rs

use async_trait::async_trait;

use models::{
    BackendStatus, ChatReply, Doctor, DoctorDraft, DoctorId, HealthRecord, InsightsResponse, MutationAck, NewDoctor,
    NewHealthRecord, NewTreatment, NewUser, RecordDraft, RecordId, Treatment, TreatmentId, User, UserId,
    VoiceParseResponse,
};

use crate::errors::Result;

/// Everything the client asks of the LifeTrack REST backend.
///
/// `api_client::ApiService` is the HTTP implementation. Views and flows are
/// written against this trait so they can be exercised without a server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthBackend: Send + Sync {
    async fn health_check(&self) -> Result<BackendStatus>;

    async fn fetch_users(&self) -> Result<Vec<User>>;
    async fn register(&self, user: &NewUser) -> Result<MutationAck>;

    async fn fetch_doctors(&self) -> Result<Vec<Doctor>>;
    async fn add_doctor(&self, doctor: &NewDoctor) -> Result<MutationAck>;
    async fn update_doctor(&self, doctor_id: DoctorId, doctor: &NewDoctor) -> Result<MutationAck>;
    async fn delete_doctor(&self, doctor_id: DoctorId) -> Result<MutationAck>;

    async fn fetch_health_records(&self) -> Result<Vec<HealthRecord>>;
    async fn add_health_record(&self, record: &NewHealthRecord) -> Result<MutationAck>;
    async fn update_health_record(&self, record_id: RecordId, record: &NewHealthRecord) -> Result<MutationAck>;
    async fn delete_health_record(&self, record_id: RecordId) -> Result<MutationAck>;

    async fn fetch_treatments(&self) -> Result<Vec<Treatment>>;
    async fn add_treatment(&self, treatment: &NewTreatment) -> Result<MutationAck>;
    async fn update_treatment(&self, treatment_id: TreatmentId, treatment: &NewTreatment) -> Result<MutationAck>;
    async fn delete_treatment(&self, treatment_id: TreatmentId) -> Result<MutationAck>;

    async fn health_insights(&self, user_id: UserId) -> Result<InsightsResponse>;
    async fn parse_voice_record(&self, text: &str, user_id: UserId) -> Result<VoiceParseResponse<RecordDraft>>;
    async fn parse_voice_doctor(&self, text: &str, user_id: UserId) -> Result<VoiceParseResponse<DoctorDraft>>;
    async fn chat(&self, user_id: UserId, message: &str) -> Result<ChatReply>;
}
