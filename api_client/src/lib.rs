// api_client/src/lib.rs

//! reqwest implementation of [`lifetrack_lib::HealthBackend`] against the
//! LifeTrack REST API.

mod service;

pub use service::ApiService;
