//! Supabase `PostgREST` insert client.
//!
//! A store built without a URL or key is disabled: every save succeeds
//! without touching the network. A configured store propagates any failure.

use std::time::Duration;

use presence_core::{ScoreSnapshot, SessionStore, StoreSettings, SurveyInput};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::StoreError;
use crate::record::SessionRecord;

/// Writes analysis sessions to a Supabase table.
pub struct SupabaseStore {
    target: Option<Target>,
}

struct Target {
    client: Client,
    insert_url: Url,
    anon_key: String,
    table: String,
}

/// `PostgREST` error body: `{"code", "message", "details", "hint"}`.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

impl SupabaseStore {
    /// Creates a store that writes to `{base_url}/rest/v1/{table}`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`StoreError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        anon_key: &str,
        table: &str,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("presence-analyzer/0.1 (sessions)")
            .build()?;

        let raw = format!("{}/rest/v1/{table}", base_url.trim_end_matches('/'));
        let insert_url = Url::parse(&raw).map_err(|e| StoreError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            target: Some(Target {
                client,
                insert_url,
                anon_key: anon_key.to_owned(),
                table: table.to_owned(),
            }),
        })
    }

    /// A store that skips every save.
    #[must_use]
    pub fn disabled() -> Self {
        Self { target: None }
    }

    /// Builds a configured store, or a disabled one when the URL or key is
    /// missing.
    ///
    /// # Errors
    ///
    /// Any error from [`SupabaseStore::new`].
    pub fn from_settings(settings: &StoreSettings) -> Result<Self, StoreError> {
        match (&settings.url, &settings.anon_key) {
            (Some(url), Some(key)) => Self::new(url, key, &settings.table, settings.timeout_secs),
            _ => Ok(Self::disabled()),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    /// Inserts one session row.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Http`] on network failure.
    /// - [`StoreError::Insert`] when the table rejects the row.
    pub async fn save_session(
        &self,
        input: &SurveyInput,
        snapshot: &ScoreSnapshot,
    ) -> Result<(), StoreError> {
        let Some(target) = &self.target else {
            tracing::warn!("session store not configured; skipping save");
            return Ok(());
        };

        let record = SessionRecord::new(input, snapshot);
        let response = target
            .client
            .post(target.insert_url.clone())
            .header("apikey", &target.anon_key)
            .bearer_auth(&target.anon_key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(table = %target.table, "analysis session saved");
            return Ok(());
        }

        let body = response.text().await?;
        let message = serde_json::from_str::<PostgrestError>(&body)
            .map_or_else(|_| body.trim().to_string(), |e| e.message);
        tracing::error!(
            table = %target.table,
            status = status.as_u16(),
            %message,
            "session insert rejected"
        );
        Err(StoreError::Insert {
            table: target.table.clone(),
            status: status.as_u16(),
            message,
        })
    }
}

impl SessionStore for SupabaseStore {
    type Error = StoreError;

    async fn save(&self, input: &SurveyInput, snapshot: &ScoreSnapshot) -> Result<(), StoreError> {
        self.save_session(input, snapshot).await
    }
}
