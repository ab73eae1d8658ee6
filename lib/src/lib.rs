// lib/src/lib.rs

//! Client-side core of LifeTrack: the relational views rebuilt from flat
//! REST collections, the backend seam they are computed through, the
//! patient session, voice dictation flows, and client configuration.

pub mod aggregator;
pub mod backend;
pub mod config;
pub mod errors;
pub mod generation;
pub mod session;
pub mod views;
pub mod voice;

pub use crate::aggregator::HomeSummary;
pub use crate::backend::HealthBackend;
pub use crate::config::ClientConfig;
pub use crate::errors::*;
pub use crate::generation::{Generation, Ticket};
pub use crate::session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use crate::views::SystemCounts;
pub use crate::voice::{CaptureEvent, ReaderCapture, SpeechCapture};

pub use models;
