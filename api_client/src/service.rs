// api_client/src/service.rs

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use lifetrack_lib::config::ClientConfig;
use lifetrack_lib::errors::{PhrError, Result};
use lifetrack_lib::HealthBackend;
use models::{
    BackendStatus, ChatReply, ChatRequest, Collection, Doctor, DoctorDraft, DoctorId, HealthRecord, InsightsResponse,
    MutationAck, NewDoctor, NewHealthRecord, NewTreatment, NewUser, RecordDraft, RecordId, Treatment, TreatmentId,
    User, UserId, VoiceParseRequest, VoiceParseResponse,
};

/// HTTP client for the LifeTrack REST backend.
///
/// Every failure, whether the connection broke or the backend answered
/// non-2xx, comes back as [`PhrError::Request`] carrying the backend's own
/// `message` when there is one and the operation's fixed text otherwise.
/// Listing users is the exception: its fixed text is followed by the cause.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
    insights_timeout: Duration,
    voice_timeout: Duration,
}

impl ApiService {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| PhrError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ApiService {
            client,
            base_url: config.base_url().to_string(),
            insights_timeout: config.insights_timeout(),
            voice_timeout: config.voice_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T> {
        self.send(Method::GET, path, self.request(Method::GET, path), fallback).await
    }

    async fn write<B, T>(&self, method: Method, path: &str, body: &B, fallback: &str) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path).json(body);
        self.send(method, path, request, fallback).await
    }

    async fn delete(&self, path: &str, fallback: &str) -> Result<MutationAck> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path), fallback).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T> {
        self.exchange(method, path, request).await.map_err(|failure| PhrError::Request {
            message: failure.backend_message.unwrap_or_else(|| fallback.to_string()),
            status: failure.status,
        })
    }

    /// Like [`get`](Self::get), but the error reads `"<fallback>: <cause>"`
    /// where the cause is the backend's message or the underlying failure.
    async fn get_with_cause<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T> {
        self.exchange(Method::GET, path, self.request(Method::GET, path)).await.map_err(|failure| {
            let cause = failure.backend_message.unwrap_or(failure.cause);
            PhrError::Request { message: format!("{}: {}", fallback, cause), status: failure.status }
        })
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> std::result::Result<T, Failure> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("API error: {} {} failed to send: {}", method, path, e);
                return Err(Failure {
                    status: e.status().map(|s| s.as_u16()),
                    backend_message: None,
                    cause: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let backend_message = backend_message(&body);
            warn!("API error: {} {} -> {}: {}", method, path, status, backend_message.as_deref().unwrap_or(&body));
            return Err(Failure {
                status: Some(status.as_u16()),
                backend_message,
                cause: format!("Request failed with status code {}", status.as_u16()),
            });
        }

        match response.json::<T>().await {
            Ok(parsed) => {
                debug!("API success: {} {} -> {}", method, path, status);
                Ok(parsed)
            }
            Err(e) => {
                warn!("API error: {} {} returned an unreadable body: {}", method, path, e);
                Err(Failure { status: Some(status.as_u16()), backend_message: None, cause: e.to_string() })
            }
        }
    }
}

/// A failed exchange before it is worded for the caller.
struct Failure {
    status: Option<u16>,
    backend_message: Option<String>,
    cause: String,
}

/// The `message` field of a JSON error body, if the backend sent one.
fn backend_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl HealthBackend for ApiService {
    async fn health_check(&self) -> Result<BackendStatus> {
        self.get("/", "Backend health check failed").await
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        self.get_with_cause(Collection::Users.path(), "Failed to fetch users").await
    }

    async fn register(&self, user: &NewUser) -> Result<MutationAck> {
        self.write(Method::POST, Collection::Users.path(), user, "Failed to register user").await
    }

    async fn fetch_doctors(&self) -> Result<Vec<Doctor>> {
        self.get(Collection::Doctors.path(), "Failed to fetch doctors").await
    }

    async fn add_doctor(&self, doctor: &NewDoctor) -> Result<MutationAck> {
        self.write(Method::POST, Collection::Doctors.path(), doctor, "Failed to add doctor").await
    }

    async fn update_doctor(&self, doctor_id: DoctorId, doctor: &NewDoctor) -> Result<MutationAck> {
        let path = Collection::Doctors.member_path(doctor_id);
        self.write(Method::PUT, &path, doctor, "Failed to update doctor").await
    }

    async fn delete_doctor(&self, doctor_id: DoctorId) -> Result<MutationAck> {
        self.delete(&Collection::Doctors.member_path(doctor_id), "Failed to delete doctor").await
    }

    async fn fetch_health_records(&self) -> Result<Vec<HealthRecord>> {
        self.get(Collection::HealthRecords.path(), "Failed to fetch health records").await
    }

    async fn add_health_record(&self, record: &NewHealthRecord) -> Result<MutationAck> {
        self.write(Method::POST, Collection::HealthRecords.path(), record, "Failed to add health record").await
    }

    async fn update_health_record(&self, record_id: RecordId, record: &NewHealthRecord) -> Result<MutationAck> {
        let path = Collection::HealthRecords.member_path(record_id);
        self.write(Method::PUT, &path, record, "Failed to update health record").await
    }

    async fn delete_health_record(&self, record_id: RecordId) -> Result<MutationAck> {
        self.delete(&Collection::HealthRecords.member_path(record_id), "Failed to delete health record").await
    }

    async fn fetch_treatments(&self) -> Result<Vec<Treatment>> {
        self.get(Collection::Treatments.path(), "Failed to fetch treatments").await
    }

    async fn add_treatment(&self, treatment: &NewTreatment) -> Result<MutationAck> {
        self.write(Method::POST, Collection::Treatments.path(), treatment, "Failed to add treatment").await
    }

    async fn update_treatment(&self, treatment_id: TreatmentId, treatment: &NewTreatment) -> Result<MutationAck> {
        let path = Collection::Treatments.member_path(treatment_id);
        self.write(Method::PUT, &path, treatment, "Failed to update treatment").await
    }

    async fn delete_treatment(&self, treatment_id: TreatmentId) -> Result<MutationAck> {
        self.delete(&Collection::Treatments.member_path(treatment_id), "Failed to delete treatment").await
    }

    async fn health_insights(&self, user_id: UserId) -> Result<InsightsResponse> {
        let path = format!("/api/health-insights/{}", user_id);
        let request = self.request(Method::GET, &path).timeout(self.insights_timeout);
        self.send(Method::GET, &path, request, "Failed to fetch health insights").await
    }

    async fn parse_voice_record(&self, text: &str, user_id: UserId) -> Result<VoiceParseResponse<RecordDraft>> {
        self.parse_voice("/api/parse-voice-record", text, user_id).await
    }

    async fn parse_voice_doctor(&self, text: &str, user_id: UserId) -> Result<VoiceParseResponse<DoctorDraft>> {
        self.parse_voice("/api/parse-voice-doctor", text, user_id).await
    }

    async fn chat(&self, user_id: UserId, message: &str) -> Result<ChatReply> {
        let path = "/api/chatbot";
        let body = ChatRequest { user_id, message: message.to_string() };
        let request = self.request(Method::POST, path).json(&body).timeout(self.voice_timeout);
        self.send(Method::POST, path, request, "Failed to reach the health assistant").await
    }
}

impl ApiService {
    async fn parse_voice<T: DeserializeOwned>(
        &self,
        path: &str,
        text: &str,
        user_id: UserId,
    ) -> Result<VoiceParseResponse<T>> {
        let body = VoiceParseRequest { text: text.to_string(), user_id };
        let request = self.request(Method::POST, path).json(&body).timeout(self.voice_timeout);
        self.send(Method::POST, path, request, "Failed to parse voice input").await
    }
}
