//! Session data model, audit log and read-only views.
//!
//! A `Session` is owned by the engine's registry. Callers only ever see
//! owned views (`SessionSnapshot`, `PollView`, `CurrentQuestion`) built
//! under the session lock.

pub mod event;
pub mod state;
pub mod view;

pub use event::{SessionEvent, WrongAnswer};
pub use state::Session;
pub use view::{CurrentQuestion, PollView, QuestionView, SessionSnapshot};
