// lib/src/views.rs

//! Screen-level views: fetch every collection a view needs concurrently,
//! then join client-side with [`crate::aggregator`]. If any fetch fails the
//! whole view fails with that view's fixed message; there are no partial
//! results.

use log::{debug, info, warn};

use models::{Doctor, HealthRecord, PublicUser, Treatment, TreatmentHistoryEntry, UserId};

use crate::aggregator::{self, HomeSummary};
use crate::backend::HealthBackend;
use crate::errors::{PhrError, Result};

/// System-wide counts for the dashboard screen.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SystemCounts {
    pub users: usize,
    pub doctors: usize,
    pub health_records: usize,
    pub treatments: usize,
}

pub async fn doctors_visited_by_user<B>(backend: &B, user_id: UserId) -> Result<Vec<Doctor>>
where
    B: HealthBackend + ?Sized,
{
    let (doctors, records) = tokio::try_join!(backend.fetch_doctors(), backend.fetch_health_records())
        .map_err(|e| e.with_fallback("Failed to fetch visited doctors"))?;
    Ok(aggregator::doctors_visited_by_user(&doctors, &records, user_id))
}

pub async fn user_health_records<B>(backend: &B, user_id: UserId) -> Result<Vec<HealthRecord>>
where
    B: HealthBackend + ?Sized,
{
    let records = backend
        .fetch_health_records()
        .await
        .map_err(|e| e.with_fallback("Failed to fetch user health records"))?;
    Ok(aggregator::user_health_records(&records, user_id))
}

/// The user's records together with the full doctor list, which the records
/// screen needs to label each record with its attending doctor.
pub async fn user_records_with_doctors<B>(backend: &B, user_id: UserId) -> Result<(Vec<HealthRecord>, Vec<Doctor>)>
where
    B: HealthBackend + ?Sized,
{
    let (records, doctors) = tokio::try_join!(backend.fetch_health_records(), backend.fetch_doctors())
        .map_err(|e| e.with_fallback("Failed to fetch user health records"))?;
    Ok((aggregator::user_health_records(&records, user_id), doctors))
}

pub async fn user_treatments<B>(backend: &B, user_id: UserId) -> Result<Vec<Treatment>>
where
    B: HealthBackend + ?Sized,
{
    let (treatments, records) = tokio::try_join!(backend.fetch_treatments(), backend.fetch_health_records())
        .map_err(|e| e.with_fallback("Failed to fetch user treatments"))?;
    Ok(aggregator::user_treatments(&treatments, &records, user_id))
}

pub async fn user_treatment_history<B>(backend: &B, user_id: UserId) -> Result<Vec<TreatmentHistoryEntry>>
where
    B: HealthBackend + ?Sized,
{
    let (treatments, records, doctors) = tokio::try_join!(
        backend.fetch_treatments(),
        backend.fetch_health_records(),
        backend.fetch_doctors()
    )
    .map_err(|e| e.with_fallback("Failed to fetch user treatment history"))?;
    Ok(aggregator::user_treatment_history(&treatments, &records, &doctors, user_id))
}

pub async fn home_summary<B>(backend: &B, user_id: UserId) -> Result<HomeSummary>
where
    B: HealthBackend + ?Sized,
{
    let (summary, _) = home_summary_with_doctors(backend, user_id).await?;
    Ok(summary)
}

/// The home summary together with the doctor list it was joined against,
/// so the recent records can be labelled without a second fetch.
pub async fn home_summary_with_doctors<B>(backend: &B, user_id: UserId) -> Result<(HomeSummary, Vec<Doctor>)>
where
    B: HealthBackend + ?Sized,
{
    let (records, treatments, doctors) = tokio::try_join!(
        backend.fetch_health_records(),
        backend.fetch_treatments(),
        backend.fetch_doctors()
    )
    .map_err(|e| e.with_fallback("Failed to load home data"))?;
    let summary = aggregator::home_summary(&records, &treatments, &doctors, user_id);
    debug!(
        "home summary for user {}: {} records, {} treatments, {} doctors",
        user_id, summary.total_records, summary.total_treatments, summary.visited_doctors
    );
    Ok((summary, doctors))
}

pub async fn system_counts<B>(backend: &B) -> Result<SystemCounts>
where
    B: HealthBackend + ?Sized,
{
    let (users, doctors, records, treatments) = tokio::try_join!(
        backend.fetch_users(),
        backend.fetch_doctors(),
        backend.fetch_health_records(),
        backend.fetch_treatments()
    )
    .map_err(|e| e.with_fallback("Failed to load dashboard data"))?;
    Ok(SystemCounts {
        users: users.len(),
        doctors: doctors.len(),
        health_records: records.len(),
        treatments: treatments.len(),
    })
}

/// Matches plaintext credentials against the full user list. The backend
/// has no login endpoint; the password never leaves this function.
pub async fn login<B>(backend: &B, email: &str, password: &str) -> Result<PublicUser>
where
    B: HealthBackend + ?Sized,
{
    info!("Login attempt for {}", email);
    let users = backend
        .fetch_users()
        .await
        .map_err(|e| e.with_fallback("Login failed. Please try again."))?;

    match users.into_iter().find(|user| user.matches_credentials(email, password)) {
        Some(user) => {
            info!("Login successful for {}", user.email);
            Ok(PublicUser::from(user))
        }
        None => {
            warn!("Invalid credentials for {}", email);
            Err(PhrError::InvalidCredentials)
        }
    }
}
