//! Event handling and state transition logic.
//!
//! The plugin runtime turns Zellij events into [`Event`]s; [`handle_event`]
//! applies them to [`AppState`] and returns whether to re-render plus the
//! [`Action`]s to execute.
//!
//! ```text
//! Key / HTTP result / worker reply → Event → handle_event → AppState
//!                                                 ↓
//!                                   Vec<Action> (fetch, persist, hide)
//! ```

use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::gateway::{PageOutcome, PageRequest};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, HTTP results, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the cursor down (wraps to top).
    KeyDown,
    /// Moves the cursor up (wraps to bottom).
    KeyUp,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    /// Opens the detail panel for the book under the cursor.
    OpenDetail,
    /// Toggles the open detail's book, or the book under the cursor.
    ToggleFavorite,
    ShowCatalog,
    ShowFavorites,
    ToggleTheme,
    /// Enters typing mode in the search bar.
    StartTyping,
    /// Closes the detail panel, or clears the error message.
    Escape,
    /// Hides the plugin pane.
    CloseFocus,

    /// Appends a character to the search draft.
    Char(char),
    /// Removes the last character of the search draft.
    Backspace,
    /// Cycles the draft filter `All → Title → Author`.
    CycleFilter,
    /// Searches for the draft.
    Submit,
    /// Leaves typing mode without searching.
    CancelTyping,

    /// A search response, tagged with the sequence number of its request.
    PageFetched { seq: u64, outcome: PageOutcome },

    /// Result of the startup permission request.
    PermissionsResult { granted: bool },

    /// A reply from the background worker.
    WorkerResponse(WorkerResponse),
}

fn fetch(request: Option<PageRequest>) -> Vec<Action> {
    request.map(Action::FetchPage).into_iter().collect()
}

fn persist(message: Option<WorkerMessage>) -> Vec<Action> {
    message.map(Action::PostToWorker).into_iter().collect()
}

/// Applies `event` to `state`.
///
/// Returns whether the UI should re-render and the actions to execute in order.
///
/// # Errors
///
/// No event currently fails. The plugin logs an `Err` and skips rendering.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage => Ok((true, fetch(state.next_page()))),
        Event::PreviousPage => Ok((true, fetch(state.previous_page()))),
        Event::FirstPage => Ok((true, fetch(state.first_page()))),
        Event::LastPage => Ok((true, fetch(state.last_page()))),
        Event::OpenDetail => Ok((state.open_detail(), vec![])),
        Event::ToggleFavorite => Ok((true, persist(state.toggle_selected_favorite()))),
        Event::ShowCatalog => {
            state.set_view(crate::app::View::Catalog);
            Ok((true, vec![]))
        }
        Event::ShowFavorites => {
            state.set_view(crate::app::View::Favorites);
            Ok((true, vec![]))
        }
        Event::ToggleTheme => Ok((true, vec![Action::PostToWorker(state.toggle_theme())])),
        Event::StartTyping => {
            state.begin_typing();
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.close_detail() {
                return Ok((true, vec![]));
            }
            Ok((state.error.take().is_some(), vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::Char(c) => {
            state.draft.push(*c);
            tracing::trace!(draft = %state.draft, "draft updated");
            Ok((true, vec![]))
        }
        Event::Backspace => Ok((state.draft.pop().is_some(), vec![])),
        Event::CycleFilter => {
            state.draft_filter = state.draft_filter.cycle();
            Ok((true, vec![]))
        }
        Event::Submit => Ok((true, fetch(state.submit_draft()))),
        Event::CancelTyping => {
            state.cancel_typing();
            Ok((true, vec![]))
        }

        Event::PageFetched { seq, outcome } => Ok((state.commit_page(*seq, outcome.clone()), vec![])),

        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::debug!("permissions granted, loading preferences");
                Ok((false, vec![Action::PostToWorker(WorkerMessage::load_preferences())]))
            } else {
                tracing::warn!("permissions denied, search and persistence unavailable");
                Ok((false, vec![]))
            }
        }

        Event::WorkerResponse(response) => match response {
            WorkerResponse::PreferencesLoaded { favorites, theme } => {
                let merged = state.apply_preferences(favorites.as_deref(), theme.as_deref());
                Ok((true, persist(merged)))
            }
            WorkerResponse::PreferenceSaved { key } => {
                tracing::trace!(key = %key, "preference saved");
                Ok((false, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!(error = %message, "worker error");
                Ok((false, vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{InputMode, View};
    use crate::domain::{Book, BookInfo, SearchFilter};
    use crate::gateway::SearchPage;
    use crate::storage::FAVORITES_KEY;
    use crate::ui::theme::ThemePair;

    fn state() -> AppState {
        AppState::new(ThemePair::default())
    }

    fn fetched_request(actions: &[Action]) -> PageRequest {
        match actions {
            [Action::FetchPage(request)] => request.clone(),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn typed_search(state: &mut AppState, query: &str) -> Vec<Action> {
        handle_event(state, &Event::StartTyping).unwrap();
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
        handle_event(state, &Event::Submit).unwrap().1
    }

    fn stub_page(id: &str, total_count: usize) -> PageOutcome {
        Ok(SearchPage {
            books: vec![Book::new(
                id,
                BookInfo {
                    title: Some("The Fellowship of the Ring".to_string()),
                    authors: vec!["J.R.R. Tolkien".to_string()],
                    ..Default::default()
                },
            )],
            total_count,
        })
    }

    #[test]
    fn test_typed_author_search_round_trip() {
        let mut state = state();
        handle_event(&mut state, &Event::StartTyping).unwrap();
        handle_event(&mut state, &Event::CycleFilter).unwrap();
        handle_event(&mut state, &Event::CycleFilter).unwrap();
        for c in "tolkien".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let request = fetched_request(&actions);
        assert_eq!(request.term, "inauthor:tolkien");
        assert_eq!(state.filter, SearchFilter::Author);

        let (render, actions) = handle_event(
            &mut state,
            &Event::PageFetched {
                seq: request.seq,
                outcome: stub_page("itemA", 1),
            },
        )
        .unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.view, View::Search);
        assert_eq!(state.visible_books().len(), 1);
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn test_blank_submit_issues_nothing() {
        let mut state = state();
        let actions = typed_search(&mut state, "   ");
        assert!(actions.is_empty());
        assert_eq!(state.view, View::Catalog);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_stale_fetch_does_not_render() {
        let mut state = state();
        let old = fetched_request(&typed_search(&mut state, "dune"));
        let new = fetched_request(&typed_search(&mut state, "emma"));

        let (render, _) = handle_event(
            &mut state,
            &Event::PageFetched {
                seq: old.seq,
                outcome: stub_page("old", 1),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.loading);

        handle_event(
            &mut state,
            &Event::PageFetched {
                seq: new.seq,
                outcome: stub_page("new", 1),
            },
        )
        .unwrap();
        assert_eq!(state.visible_books()[0].id, "new");
    }

    #[test]
    fn test_page_keys_in_catalog_never_fetch() {
        let mut state = state();
        for event in [Event::NextPage, Event::PreviousPage, Event::FirstPage, Event::LastPage] {
            let (_, actions) = handle_event(&mut state, &event).unwrap();
            assert!(actions.is_empty());
            assert_eq!(state.page, 1);
        }
    }

    #[test]
    fn test_next_page_in_search_fetches() {
        let mut state = state();
        let request = fetched_request(&typed_search(&mut state, "dune"));
        handle_event(
            &mut state,
            &Event::PageFetched {
                seq: request.seq,
                outcome: stub_page("a", 30),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert_eq!(fetched_request(&actions).offset, 12);
    }

    #[test]
    fn test_toggle_favorite_posts_save() {
        let mut state = state();
        state.apply_preferences(None, None);
        let (_, actions) = handle_event(&mut state, &Event::ToggleFavorite).unwrap();

        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::SavePreference { key, .. })] if key == FAVORITES_KEY
        ));
        assert!(state.is_favorite("1"));
    }

    #[test]
    fn test_toggle_favorite_with_nothing_visible_does_nothing() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowFavorites).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_escape_closes_detail_before_clearing_error() {
        let mut state = state();
        state.error = Some("boom".to_string());
        handle_event(&mut state, &Event::OpenDetail).unwrap();

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(state.detail.is_none());
        assert!(state.error.is_some());

        let (render, _) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(render);
        assert!(state.error.is_none());

        let (render, _) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!render);
    }

    #[test]
    fn test_permissions_granted_loads_preferences() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadPreferences { .. })]
        ));

        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_preferences_response_applies_state() {
        let mut state = state();
        let response = WorkerResponse::PreferencesLoaded {
            favorites: Some(r#"[{"id":"4","title":"The Hobbit"}]"#.to_string()),
            theme: Some("dark".to_string()),
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        assert!(render);
        assert!(state.is_favorite("4"));
        assert!(state.dark_mode);
    }

    #[test]
    fn test_toggle_before_load_is_saved_with_stored_favorites() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(actions.is_empty());

        let response = WorkerResponse::PreferencesLoaded {
            favorites: Some(r#"[{"id":"4","title":"The Hobbit"}]"#.to_string()),
            theme: None,
        };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        let [Action::PostToWorker(WorkerMessage::SavePreference { key, value, .. })] = actions.as_slice() else {
            panic!("expected a favorites save, got {actions:?}");
        };
        assert_eq!(key, FAVORITES_KEY);
        assert!(value.contains(r#""id":"4""#));
        assert!(value.contains(r#""id":"1""#));
        assert!(state.is_favorite("1"));
        assert!(state.is_favorite("4"));
    }

    #[test]
    fn test_worker_error_keeps_in_memory_state() {
        let mut state = state();
        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        let (render, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                message: "save preference: disk full".to_string(),
            }),
        )
        .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.is_favorite("1"));
    }

    #[test]
    fn test_close_focus_hides() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
