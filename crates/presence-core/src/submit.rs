//! Submission boundary: persist the session, then ask for insights.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;

use crate::insight::{InsightGenerator, InsightResult};
use crate::scoring::{compute_snapshot, ScoreSnapshot};
use crate::survey::SurveyInput;

/// The only message shown to a user when a submission fails.
pub const FAILURE_NOTICE: &str =
    "Something went wrong. Please check your internet connection and try again.";

pub const IN_FLIGHT_NOTICE: &str = "Your analysis is already running.";

/// Records one submitted survey somewhere durable.
///
/// An implementation without a configured backend succeeds without doing
/// anything.
pub trait SessionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save(
        &self,
        input: &SurveyInput,
        snapshot: &ScoreSnapshot,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmitError<P, I> {
    #[error("a submission for {0} is already in progress")]
    InFlight(String),

    #[error("failed to persist analysis session: {0}")]
    Persist(#[source] P),

    #[error("failed to generate insights: {0}")]
    Insight(#[source] I),
}

impl<P, I> SubmitError<P, I> {
    /// What the user sees. Persistence and insight failures are not told apart.
    #[must_use]
    pub fn user_notice(&self) -> &'static str {
        match self {
            Self::InFlight(_) => IN_FLIGHT_NOTICE,
            Self::Persist(_) | Self::Insight(_) => FAILURE_NOTICE,
        }
    }
}

/// Snapshot and insight returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub snapshot: ScoreSnapshot,
    pub insight: InsightResult,
}

/// Scores `input`, stores it, then generates insights.
///
/// Persistence is awaited to completion before the insight call starts; a
/// persistence failure means the insight generator is never called. Nothing
/// is retried. Resubmitting after an insight failure stores the session again.
///
/// # Errors
///
/// - [`SubmitError::Persist`] with the store's error, untouched.
/// - [`SubmitError::Insight`] with the generator's error, untouched.
pub async fn submit_analysis<S, G>(
    store: &S,
    generator: &G,
    input: &SurveyInput,
) -> Result<Submission, SubmitError<S::Error, G::Error>>
where
    S: SessionStore + Sync,
    G: InsightGenerator + Sync,
{
    let snapshot = compute_snapshot(input);

    store.save(input, &snapshot).await.map_err(|e| {
        tracing::error!(error = %e, "analysis session could not be saved");
        SubmitError::Persist(e)
    })?;

    let insight = generator.generate(input, &snapshot).await.map_err(|e| {
        tracing::error!(error = %e, "insight generation failed");
        SubmitError::Insight(e)
    })?;

    tracing::info!(score = snapshot.rounded_score(), "analysis submitted");
    Ok(Submission { snapshot, insight })
}

/// Loading flag: at most one submission per key runs at a time.
///
/// Keys are lead emails, compared case-insensitively. Cloning shares the
/// same in-flight set.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SubmitGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as in flight. Returns `None` if it already is.
    #[must_use]
    pub fn try_acquire(&self, key: &str) -> Option<SubmitPermit> {
        let key = key.trim().to_lowercase();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(key.clone()) {
            return None;
        }
        Some(SubmitPermit {
            gate: self.clone(),
            key,
        })
    }

    #[must_use]
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key.trim().to_lowercase())
    }
}

/// Held for the duration of one submission; releases its key on drop.
#[derive(Debug)]
pub struct SubmitPermit {
    gate: SubmitGate,
    key: String,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.gate
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Acquires the gate for the survey's lead email and submits.
///
/// # Errors
///
/// [`SubmitError::InFlight`] if the same lead is already submitting, otherwise
/// as [`submit_analysis`].
pub async fn submit_gated<S, G>(
    gate: &SubmitGate,
    store: &S,
    generator: &G,
    input: &SurveyInput,
) -> Result<Submission, SubmitError<S::Error, G::Error>>
where
    S: SessionStore + Sync,
    G: InsightGenerator + Sync,
{
    let email = input.lead_info.email.as_str();
    let Some(_permit) = gate.try_acquire(email) else {
        tracing::warn!(email, "duplicate submission rejected while one is in flight");
        return Err(SubmitError::InFlight(email.to_string()));
    };
    submit_analysis(store, generator, input).await
}
