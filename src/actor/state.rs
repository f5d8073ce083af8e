//! Shared playback state and tick notifications.
//!
//! The scheduler thread is the only writer. Everything here is readable
//! from any thread without locking; there are no public mutators.

use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::time::Duration;

/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SchedulerPhase {
    /// Created, loop not yet entered.
    Idle = 0,
    /// Emitting frames.
    Running = 1,
    /// Cancellation observed, loop unwinding.
    Stopping = 2,
    /// Loop exited; the thread is ready to be joined.
    Stopped = 3,
}

impl SchedulerPhase {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Running,
            2 => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

/// A tick event published after each frame is handed to the transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Tick number since the session started (monotonically increasing).
    pub tick: u64,
    /// Frame index that was emitted.
    pub index: usize,
    /// Completed passes through the clip before this tick.
    pub pass: u64,
    /// Time elapsed since the loop started.
    pub elapsed: Duration,
}

/// Where the idle loop is, plus delivery counters.
#[derive(Debug)]
pub struct PlaybackState {
    /// Index of the frame most recently published.
    index: AtomicUsize,
    phase: AtomicU8,
    ticks: AtomicU64,
    passes: AtomicU64,
    frames_sent: AtomicU64,
    frames_dropped: AtomicU64,
}

impl PlaybackState {
    pub(crate) const fn new() -> Self {
        Self {
            index: AtomicUsize::new(0),
            phase: AtomicU8::new(SchedulerPhase::Idle as u8),
            ticks: AtomicU64::new(0),
            passes: AtomicU64::new(0),
            frames_sent: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
        }
    }

    /// Index of the frame currently being transmitted.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index.load(Ordering::Acquire)
    }

    /// Scheduler lifecycle phase.
    #[inline]
    pub fn phase(&self) -> SchedulerPhase {
        SchedulerPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Ticks taken so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Completed passes through the clip.
    pub fn passes(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }

    /// Frames the transmitter accepted.
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent.load(Ordering::Relaxed)
    }

    /// Frames dropped by transport errors.
    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }

    pub(crate) fn publish(&self, index: usize) {
        self.index.store(index, Ordering::Release);
    }

    pub(crate) fn set_phase(&self, phase: SchedulerPhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    pub(crate) fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_pass(&self) {
        self.passes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sent(&self) {
        self.frames_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }
}
