//! Configuration for an idle session.

use crate::error::{IdleError, Result};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

/// Port Live Link Face receivers listen on by default.
pub const DEFAULT_PORT: u16 = 11111;

/// Configuration for the idle loop.
#[derive(Debug, Clone)]
pub struct IdleConfig {
    /// Target frames per second.
    pub target_fps: u32,
    /// Longest single sleep between cancellation checks.
    pub sleep_slice: Duration,
    /// Frames blended across the loop seam when preparing a clip.
    pub blend_frames: usize,
    /// Live Link subject name the receiver binds to.
    pub subject_name: String,
    /// Receiver address.
    pub destination: SocketAddr,
    /// Tick notifications buffered for observers before new ones are dropped.
    pub tick_capacity: usize,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            sleep_slice: Duration::from_millis(5),
            blend_frames: 16,
            subject_name: "LiveLinkFace".to_string(),
            destination: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            tick_capacity: 2,
        }
    }
}

impl IdleConfig {
    /// Set the target frame rate.
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Set the sleep slice.
    #[must_use]
    pub fn with_sleep_slice(mut self, slice: Duration) -> Self {
        self.sleep_slice = slice;
        self
    }

    /// Set the seam blend window.
    #[must_use]
    pub fn with_blend_frames(mut self, frames: usize) -> Self {
        self.blend_frames = frames;
        self
    }

    /// Set the subject name.
    #[must_use]
    pub fn with_subject_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = name.into();
        self
    }

    /// Set the receiver address.
    #[must_use]
    pub fn with_destination(mut self, destination: SocketAddr) -> Self {
        self.destination = destination;
        self
    }

    /// Time budget for one tick.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }

    /// Reject values the scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.target_fps == 0 {
            return Err(IdleError::configuration("target_fps must be at least 1"));
        }
        if self.sleep_slice.is_zero() {
            return Err(IdleError::configuration("sleep_slice must be non-zero"));
        }
        if self.tick_capacity == 0 {
            return Err(IdleError::configuration("tick_capacity must be at least 1"));
        }
        Ok(())
    }
}
