//! Actor: the idle loop's background thread and its control surface.
//!
//! The session owns one scheduler thread. The owning process talks to it
//! only through the cancellation token and the shared playback state:
//!
//! ```text
//! ┌───────────────┐  CancellationToken  ┌──────────────────┐   datagram   ┌─────────────┐
//! │               │ ──────────────────▶ │                  │ ───────────▶ │ Transmitter │
//! │  IdleSession  │                     │ Scheduler Thread │              └─────────────┘
//! │               │ ◀── PlaybackState ─ │                  │
//! └───────────────┘ ◀────── Tick ────── └──────────────────┘
//! ```
//!
//! Hand-off to another producer is the owner's job: stop the session (which
//! joins the thread), then give the returned transmitter to the next writer.

mod cancel;
mod scheduler;
mod session;
mod state;

pub use cancel::CancellationToken;
pub use session::IdleSession;
pub use state::{PlaybackState, SchedulerPhase, Tick};
