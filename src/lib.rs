//! # Idleface
//!
//! A paced idle-animation streamer for Live Link Face receivers.
//!
//! Idleface keeps a virtual face alive between utterances: it loops a
//! seam-blended blendshape clip at a fixed frame rate and sends one
//! datagram per frame to a 3D character rig, until the owning process stops
//! it to let speech animation take over the same channel.
//!
//! ## Core Concepts
//!
//! - **Frame store**: an immutable, seam-blended clip loaded once at startup
//! - **Scheduler thread**: fixed-cadence loop with sliced sleeps for prompt stop
//! - **Shared playback state**: lock-free current index for cross-fading
//! - **Fire-and-forget transport**: dropped frames are logged, never fatal
//!
//! ## Example
//!
//! ```rust,ignore
//! use idleface::{clip, IdleConfig, IdleSession};
//! use std::sync::Arc;
//!
//! let config = IdleConfig::default();
//! let clip = Arc::new(clip::prepare("default.csv", config.blend_frames)?);
//!
//! let session = IdleSession::connect(clip, &config)?;
//! // ... speech is ready: note where the idle loop is, then take the channel.
//! let from = session.current_frame().map(<[f32]>::to_vec);
//! let transmitter = session.stop()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod clip;
pub mod config;
pub mod error;
pub mod livelink;
pub mod provision;
pub mod transport;

// Re-exports for convenience
pub use actor::{CancellationToken, IdleSession, PlaybackState, SchedulerPhase, Tick};
pub use clip::{crossfade, FrameStore};
pub use config::IdleConfig;
pub use error::{IdleError, Result, TransmissionError};
pub use livelink::{FaceBlendShape, FaceFrame};
pub use transport::{Transmitter, UdpTransmitter};
