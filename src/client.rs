// src/client.rs

//! HTTP client for the game backend. The two GETs feed the initial load
//! and any failure there is fatal for the load; the progress POST is
//! best-effort and only ever logged.

use crate::constants::{LEVELS_ENDPOINT, PROGRESS_ENDPOINT};
use crate::error::GameError;
use crate::models::{Level, Progress, ProgressUpdate};
use log::debug;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the backend origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /api/levels` → the full level catalog. Non-200 is fatal.
    pub async fn fetch_levels(&self) -> Result<Vec<Level>, GameError> {
        let url = format!("{}{}", self.base_url, LEVELS_ENDPOINT);
        debug!("[Api] GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GameError::LoadFailure(e.to_string()))?;
        if !response.status().is_success() {
            return Err(GameError::LoadFailure(format!(
                "levels request returned {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| GameError::LoadFailure(format!("bad levels payload: {e}")))
    }

    /// `GET /api/progress/{userId}` → saved progress. Non-200 is fatal;
    /// an empty body field defaults to level 0.
    pub async fn fetch_progress(&self, user_id: &str) -> Result<Progress, GameError> {
        let url = format!("{}{}/{user_id}", self.base_url, PROGRESS_ENDPOINT);
        debug!("[Api] GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GameError::LoadFailure(e.to_string()))?;
        if !response.status().is_success() {
            return Err(GameError::LoadFailure(format!(
                "progress request returned {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| GameError::LoadFailure(format!("bad progress payload: {e}")))
    }

    /// `POST /api/progress`. Any HTTP response counts as accepted; only a
    /// transport failure surfaces, and callers log rather than propagate.
    pub async fn save_progress(
        &self,
        user_id: &str,
        last_completed_level: usize,
    ) -> Result<(), GameError> {
        let url = format!("{}{}", self.base_url, PROGRESS_ENDPOINT);
        let body = ProgressUpdate {
            user_id: user_id.to_string(),
            last_completed_level,
        };
        debug!("[Api] POST {url} (lastCompletedLevel={last_completed_level})");
        self.http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GameError::SaveFailure(e.to_string()))?;
        Ok(())
    }
}
