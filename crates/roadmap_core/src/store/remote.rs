//! HTTP whole-document store.
//!
//! # Responsibility
//! - Fetch the latest document and replace the stored document over HTTP.
//! - Unwrap the `{ "record": <document> }` envelope on both calls.
//!
//! # Invariants
//! - Every request carries the configured credential header.
//! - Transport, status and decode failures all surface as `StoreError`.

use super::{RemoteStore, StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::model::document::Document;
use log::{info, warn};
use serde::Deserialize;
use std::time::Instant;

const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct Envelope {
    record: Document,
}

/// Blocking client for a JSONBin-style record store.
pub struct JsonBinStore {
    config: StoreConfig,
    agent: ureq::Agent,
}

impl JsonBinStore {
    pub fn new(config: StoreConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    fn finish(
        &self,
        operation: &str,
        started_at: Instant,
        result: Result<ureq::Response, ureq::Error>,
    ) -> StoreResult<Document> {
        let outcome = result
            .map_err(map_ureq_error)
            .and_then(|response| {
                response
                    .into_json::<Envelope>()
                    .map(|envelope| envelope.record)
                    .map_err(|err| StoreError::Decode(err.to_string()))
            });

        match &outcome {
            Ok(document) => info!(
                "event=store_{operation} module=store status=ok duration_ms={} subjects={}",
                started_at.elapsed().as_millis(),
                document.subjects.len()
            ),
            Err(err) => warn!(
                "event=store_{operation} module=store status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(err),
                err
            ),
        }
        outcome
    }
}

impl RemoteStore for JsonBinStore {
    fn fetch_latest(&self) -> StoreResult<Document> {
        let started_at = Instant::now();
        info!("event=store_fetch module=store status=start");
        let result = self
            .agent
            .get(&self.config.latest_url())
            .set(&self.config.auth_header, &self.config.api_key)
            .call();
        self.finish("fetch", started_at, result)
    }

    fn replace(&self, document: &Document) -> StoreResult<Document> {
        let started_at = Instant::now();
        info!(
            "event=store_replace module=store status=start subjects={}",
            document.subjects.len()
        );
        let body =
            serde_json::to_value(document).map_err(|err| StoreError::Encode(err.to_string()))?;
        let result = self
            .agent
            .put(&self.config.document_url())
            .set(&self.config.auth_header, &self.config.api_key)
            .send_json(body);
        self.finish("replace", started_at, result)
    }
}

fn map_ureq_error(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response
                .into_string()
                .map(|body| body.chars().take(MAX_ERROR_BODY_CHARS).collect())
                .unwrap_or_default();
            StoreError::Status { code, body }
        }
        ureq::Error::Transport(transport) => StoreError::Transport(transport.to_string()),
    }
}

fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::Transport(_) => "store_transport",
        StoreError::Status { .. } => "store_status",
        StoreError::Decode(_) => "store_decode",
        StoreError::Encode(_) => "store_encode",
    }
}
