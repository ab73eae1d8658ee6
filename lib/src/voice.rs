// lib/src/voice.rs

//! Voice dictation.
//!
//! Capture is a platform capability behind [`SpeechCapture`]; the rest of
//! the client only ever sees the final transcript. The transcript goes to
//! the backend's AI parser, comes back as a draft the patient reviews, and
//! is saved through the ordinary create endpoints.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedSender};

use models::{DoctorDraft, MutationAck, RecordDraft, UserId, VoiceParseResponse};

use crate::backend::HealthBackend;
use crate::errors::{PhrError, Result};

const PARSE_FALLBACK: &str = "Failed to parse voice input";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Interim hypothesis, may still change.
    Partial(String),
    Final(String),
    Error(String),
    /// The recognizer stopped on its own.
    Ended,
}

/// A speech recognizer. `start` begins delivering events on `events` until
/// a final result, an error, or `stop`.
pub trait SpeechCapture: Send {
    fn start(&mut self, events: UnboundedSender<CaptureEvent>) -> Result<()>;
    fn stop(&mut self);
}

/// Runs one capture to completion and returns the finalized transcript.
pub async fn capture_transcript<C>(capture: &mut C) -> Result<String>
where
    C: SpeechCapture + ?Sized,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    capture.start(tx)?;

    let outcome = loop {
        match rx.recv().await {
            Some(CaptureEvent::Partial(text)) => debug!("partial transcript: {}", text),
            Some(CaptureEvent::Final(text)) if !text.trim().is_empty() => break Ok(text.trim().to_string()),
            Some(CaptureEvent::Final(_)) => continue,
            Some(CaptureEvent::Error(e)) => break Err(PhrError::Capture(format!("Speech recognition error: {}", e))),
            Some(CaptureEvent::Ended) | None => break Err(PhrError::Capture("No speech was captured".to_string())),
        }
    };

    capture.stop();
    outcome
}

/// Dictation from a line-oriented reader (a terminal, a pipe, a file).
/// Each line is a partial result; a blank line or end of input finalizes.
pub struct ReaderCapture<R> {
    reader: Option<R>,
    stopped: Arc<AtomicBool>,
}

impl<R> ReaderCapture<R>
where
    R: BufRead + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        ReaderCapture { reader: Some(reader), stopped: Arc::new(AtomicBool::new(false)) }
    }
}

impl<R> SpeechCapture for ReaderCapture<R>
where
    R: BufRead + Send + 'static,
{
    fn start(&mut self, events: UnboundedSender<CaptureEvent>) -> Result<()> {
        let reader = self
            .reader
            .take()
            .ok_or_else(|| PhrError::Capture("Dictation already started".to_string()))?;
        let stopped = Arc::clone(&self.stopped);

        thread::spawn(move || {
            let mut transcript = String::new();
            for line in reader.lines() {
                if stopped.load(Ordering::SeqCst) {
                    return;
                }
                match line {
                    Ok(line) if line.trim().is_empty() => break,
                    Ok(line) => {
                        if !transcript.is_empty() {
                            transcript.push(' ');
                        }
                        transcript.push_str(line.trim());
                        let _ = events.send(CaptureEvent::Partial(transcript.clone()));
                    }
                    Err(e) => {
                        let _ = events.send(CaptureEvent::Error(e.to_string()));
                        return;
                    }
                }
            }
            if !transcript.is_empty() {
                let _ = events.send(CaptureEvent::Final(transcript));
            }
            let _ = events.send(CaptureEvent::Ended);
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// What saving a record draft created.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRecordDraft {
    pub record: MutationAck,
    pub treatment: Option<MutationAck>,
}

pub async fn parse_record_draft<B>(backend: &B, text: &str, user_id: UserId) -> Result<RecordDraft>
where
    B: HealthBackend + ?Sized,
{
    info!("Sending voice transcript for record parsing ({} chars)", text.len());
    let response = backend.parse_voice_record(text, user_id).await?;
    unwrap_draft(response)
}

pub async fn parse_doctor_draft<B>(backend: &B, text: &str, user_id: UserId) -> Result<DoctorDraft>
where
    B: HealthBackend + ?Sized,
{
    info!("Sending voice transcript for doctor parsing ({} chars)", text.len());
    let response = backend.parse_voice_doctor(text, user_id).await?;
    unwrap_draft(response)
}

/// Creates the health record, then a treatment when the draft names a
/// medication and the backend reported the new record's id.
pub async fn save_record_draft<B>(backend: &B, draft: &RecordDraft, user_id: UserId) -> Result<SavedRecordDraft>
where
    B: HealthBackend + ?Sized,
{
    let new_record = draft.to_health_record(user_id)?;
    let record = backend.add_health_record(&new_record).await?;

    let treatment = match (record.record_id, draft.medication.is_some()) {
        (Some(record_id), true) => match draft.to_treatment(record_id) {
            Some(new_treatment) => Some(backend.add_treatment(&new_treatment).await?),
            None => None,
        },
        (None, true) => {
            warn!("Backend did not return a record id; skipping the treatment");
            None
        }
        _ => None,
    };

    Ok(SavedRecordDraft { record, treatment })
}

pub async fn save_doctor_draft<B>(backend: &B, draft: &DoctorDraft) -> Result<MutationAck>
where
    B: HealthBackend + ?Sized,
{
    let doctor = draft.to_new_doctor()?;
    backend.add_doctor(&doctor).await
}

fn unwrap_draft<T>(response: VoiceParseResponse<T>) -> Result<T> {
    match response {
        VoiceParseResponse { success: true, parsed_data: Some(draft), .. } => Ok(draft),
        VoiceParseResponse { message, .. } => Err(PhrError::VoiceParse(message.unwrap_or_else(|| PARSE_FALLBACK.to_string()))),
    }
}
