//! Background worker thread for preference storage.
//!
//! All file I/O happens here so the render loop never blocks on the disk.
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: Worker implementation and message processing

pub mod handler;
pub mod messages;

pub use handler::BookshelfWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
