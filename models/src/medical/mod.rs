// models/src/medical/mod.rs

pub mod assistant;
pub mod doctor;
pub mod health_record;
pub mod treatment;
pub mod user;
pub mod voice;

pub use assistant::{
    BackendStatus, ChatReply, ChatRequest, HealthInsights, InsightStatistics, InsightsResponse, MutationAck,
    CHAT_APOLOGY, CHAT_SUGGESTIONS,
};
pub use doctor::{Doctor, NewDoctor};
pub use health_record::{HealthRecord, NewHealthRecord};
pub use treatment::{NewTreatment, Treatment, TreatmentHistoryEntry, UNKNOWN_DOCTOR};
pub use user::{NewUser, PublicUser, User};
pub use voice::{DoctorDraft, RecordDraft, VoiceParseRequest, VoiceParseResponse};
