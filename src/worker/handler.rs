//! Worker thread implementation for preference storage.
//!
//! Runs on a thread spawned by Zellij and owns the only handle to the
//! preference file. Each incoming [`WorkerMessage`] is answered with exactly one
//! [`WorkerResponse`] posted back to the plugin.

use crate::domain::error::{BookshelfError, Result};
use crate::infrastructure::paths;
use crate::storage::backend::Storage;
use crate::storage::{JsonStorage, FAVORITES_KEY, THEME_KEY};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// File name of the preference store inside the plugin data directory.
const PREFERENCES_FILE: &str = "preferences.json";

/// Worker state. The storage backend is opened lazily on the first message.
#[derive(Serialize, Deserialize, Default)]
pub struct BookshelfWorker {
    #[serde(skip)]
    storage: Option<Box<dyn Storage>>,
}

impl BookshelfWorker {
    /// Creates a worker backed by the preference file in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new() -> Result<Self> {
        let path = paths::get_data_dir().join(PREFERENCES_FILE);
        Ok(Self::with_storage(Box::new(JsonStorage::new(path)?)))
    }

    /// Creates a worker over an already-opened backend.
    #[must_use]
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self { storage: Some(storage) }
    }

    fn get_storage(&mut self) -> Result<&mut Box<dyn Storage>> {
        self.storage
            .as_mut()
            .ok_or_else(|| BookshelfError::Worker("Storage not initialized".to_string()))
    }

    fn handle_storage_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_preferences(&mut self) -> WorkerResponse {
        Self::handle_storage_result(
            "load preferences",
            self.get_storage()
                .map(|storage| (storage.get(FAVORITES_KEY), storage.get(THEME_KEY))),
            |(favorites, theme)| {
                tracing::debug!(
                    has_favorites = favorites.is_some(),
                    has_theme = theme.is_some(),
                    "preferences loaded"
                );
                WorkerResponse::PreferencesLoaded { favorites, theme }
            },
        )
    }

    fn handle_save_preference(&mut self, key: String, value: &str) -> WorkerResponse {
        Self::handle_storage_result(
            "save preference",
            self.get_storage().and_then(|storage| storage.set(&key, value)),
            |()| WorkerResponse::PreferenceSaved { key },
        )
    }

    /// Re-enters the sender's trace so worker spans share its trace id.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadPreferences { .. } => self.handle_load_preferences(),
            WorkerMessage::SavePreference { key, value, .. } => self.handle_save_preference(key, &value),
        }
    }
}

fn post_response(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
    }
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for BookshelfWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        if self.storage.is_none() {
            match Self::new() {
                Ok(worker) => self.storage = worker.storage,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to initialize storage");
                    let response = WorkerResponse::Error {
                        message: format!("Failed to initialize storage: {e}"),
                    };
                    post_response(message, &response);
                    return;
                }
            }
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);
        post_response(message, &response);
    }
}
