// models/src/medical/assistant.rs

//! Payloads of the AI-backed endpoints (insights, chat) and the plain
//! acknowledgement envelopes the backend returns for mutations.

use serde::{Deserialize, Serialize};

use crate::identifiers::{DoctorId, RecordId, TreatmentId, UserId};

/// Response of `GET /api/health-insights/{user_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub insights: HealthInsights,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthInsights {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub trends: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub statistics: InsightStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightStatistics {
    #[serde(default)]
    pub total_records: u32,
    #[serde(default)]
    pub total_doctors: u32,
    #[serde(default)]
    pub total_treatments: u32,
    #[serde(default)]
    pub recent_visits: Option<u32>,
}

/// Body of `POST /api/chatbot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: UserId,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub records_count: Option<u32>,
    #[serde(default)]
    pub treatments_count: Option<u32>,
    #[serde(default)]
    pub doctors_count: Option<u32>,
    /// Set when the backend answered without the model.
    #[serde(default)]
    pub fallback: Option<bool>,
}

pub const CHAT_SUGGESTIONS: &[&str] = &[
    "What are my recent diagnoses?",
    "Show me my current medications",
    "When is my next follow-up?",
    "What conditions have I been treated for?",
    "Who are my healthcare providers?",
];

pub const CHAT_APOLOGY: &str =
    "I apologize, but I'm having trouble processing your request right now. Please try again in a moment.";

/// Response of `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// What create, update and delete calls answer with. Only the id matching
/// the created entity is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationAck {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub doctor_id: Option<DoctorId>,
    #[serde(default)]
    pub record_id: Option<RecordId>,
    #[serde(default)]
    pub treatment_id: Option<TreatmentId>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

fn default_success() -> bool {
    true
}
