//! Side effects requested by the event handler.
//!
//! `handle_event` never performs I/O itself. It returns a list of [`Action`]s
//! and the plugin runtime executes them in order.

use crate::gateway::PageRequest;
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one remote search request.
    ///
    /// The request's `seq` travels in the host request context and comes back
    /// with the response so stale results can be dropped.
    FetchPage(PageRequest),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}
