//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Bookshelf library and the Zellij plugin
//! system. It maps Zellij events onto library [`Event`]s, runs
//! [`handle_event`], and carries out the returned [`Action`]s through the host
//! API.
//!
//! ```text
//! ┌──────────────────────────┐        web_request         ┌──────────────┐
//! │   State (plugin thread)  │ ─────────────────────────▶ │ Google Books │
//! │                          │ ◀── WebRequestResult ───── │              │
//! │                          │                            └──────────────┘
//! │                          │   post_message_to          ┌──────────────┐
//! │                          │ ─────────────────────────▶ │ Bookshelf-   │
//! │                          │ ◀── CustomMessage ──────── │ Worker       │
//! └──────────────────────────┘                            └──────────────┘
//! ```
//!
//! # Keybindings
//!
//! Global: `Ctrl+n` / `Ctrl+p` move the cursor.
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: move cursor
//! - `l`/`Right`, `h`/`Left`: next / previous page
//! - `g`, `G`: first / last page
//! - `Enter`: book details
//! - `f`: toggle favorite
//! - `c`: catalog, `v`: favorites
//! - `/`: edit search
//! - `t`: toggle dark/light theme
//! - `Esc`: close details or dismiss the error
//! - `q`: hide plugin
//!
//! Typing mode:
//! - characters edit the query, `Backspace` deletes
//! - `Tab`: cycle filter (All / Title / Author)
//! - `Enter`: search, `Esc`: cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use bookshelf::gateway::{GoogleBooksGateway, PageRequest};
use bookshelf::worker::{BookshelfWorker, WorkerMessage, WorkerResponse};
use bookshelf::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(BookshelfWorker, bookshelf_worker, BOOKSHELF_WORKER);

/// Plugin state wrapper.
struct State {
    app: bookshelf::AppState,

    /// Worker name used for both directions of messaging.
    worker_name: String,

    gateway: GoogleBooksGateway,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: bookshelf::initialize(&config),
            worker_name: "bookshelf".to_string(),
            gateway: config.gateway(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions and subscribes to events.
    ///
    /// Stored preferences are requested from the worker once permissions are
    /// granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookshelf::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, "parsed configuration");
        self.app = bookshelf::initialize(&config);
        self.gateway = config.gateway();

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookshelf::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Typing => Self::map_typing_key(key.bare_key),
            InputMode::Normal => Self::map_normal_key(key.bare_key),
        }
    }

    fn map_typing_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::CancelTyping,
            BareKey::Tab => Event::CycleFilter,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_normal_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
            BareKey::Char('g') => Event::FirstPage,
            BareKey::Char('G') => Event::LastPage,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Char('f') => Event::ToggleFavorite,
            BareKey::Char('c') => Event::ShowCatalog,
            BareKey::Char('v') => Event::ShowFavorites,
            BareKey::Char('/') => Event::StartTyping,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Esc => Event::Escape,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Decodes a search response. Results without a sequence number in their
    /// context were not issued by the controller and are dropped.
    fn map_web_request_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(seq) = PageRequest::seq_from_context(context) else {
            tracing::debug!(status, "web request result without request sequence");
            return None;
        };

        let outcome = GoogleBooksGateway::decode_response(status, body).map_err(|e| e.to_string());
        Some(Event::PageFetched { seq, outcome })
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::FetchPage(request) => {
                let url = self.gateway.request_url(request);
                tracing::debug!(seq = request.seq, url = %url, "issuing search request");
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], request.context());
            }
            Action::PostToWorker(message) => self.post_worker_message(message),
        }
    }
}
