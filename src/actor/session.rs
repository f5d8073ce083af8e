//! Session: the owning process's handle on a running idle loop.
//!
//! Start it, read where it is, stop it. Stopping joins the scheduler
//! thread and returns the transmitter, so the next producer (speech
//! animation) can write to the same channel without overlap.

use super::cancel::CancellationToken;
use super::scheduler::Scheduler;
use super::state::{PlaybackState, SchedulerPhase, Tick};
use crate::clip::FrameStore;
use crate::config::IdleConfig;
use crate::error::{IdleError, Result};
use crate::transport::{Transmitter, UdpTransmitter};
use crossbeam_channel::{bounded, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A running idle loop on its own thread.
///
/// Dropping the session cancels and joins the thread; use
/// [`IdleSession::stop`] to get the transmitter back.
pub struct IdleSession<T> {
    /// Handle to the scheduler thread.
    handle: Option<JoinHandle<T>>,
    /// Stop signal shared with the scheduler.
    token: CancellationToken,
    /// Read-only view of the scheduler's progress.
    state: Arc<PlaybackState>,
    clip: Arc<FrameStore>,
    tick_rx: Receiver<Tick>,
}

impl<T: Transmitter + Send + 'static> IdleSession<T> {
    /// Spawn the scheduler on a background thread, starting at frame 0.
    pub fn start(clip: Arc<FrameStore>, transmitter: T, config: &IdleConfig) -> Result<Self> {
        config.validate()?;

        let token = CancellationToken::new();
        let state = Arc::new(PlaybackState::new());
        // Bounded channel with small buffer - we don't want ticks to queue up
        let (tick_tx, tick_rx) = bounded(config.tick_capacity);

        let scheduler = Scheduler::new(
            Arc::clone(&clip),
            transmitter,
            config,
            Arc::clone(&state),
            tick_tx,
        );
        let thread_token = token.clone();
        let handle = thread::Builder::new()
            .name("idleface-scheduler".to_string())
            .spawn(move || scheduler.run(&thread_token))
            .map_err(IdleError::Spawn)?;

        log::info!(
            "idle session started: {:?} at {} fps",
            clip,
            config.target_fps
        );

        Ok(Self {
            handle: Some(handle),
            token,
            state,
            clip,
            tick_rx,
        })
    }
}

impl IdleSession<UdpTransmitter> {
    /// Open a UDP channel to `config.destination` and start streaming.
    pub fn connect(clip: Arc<FrameStore>, config: &IdleConfig) -> Result<Self> {
        let transmitter = UdpTransmitter::connect(config.destination)?;
        Self::start(clip, transmitter, config)
    }
}

impl<T> IdleSession<T> {
    /// Cancel, wait for the scheduler to reach `Stopped`, and return the transmitter.
    pub fn stop(mut self) -> Result<T> {
        let transmitter = self.shutdown()?;
        log::info!(
            "idle session stopped at frame {} after {} ticks",
            self.state.current_index(),
            self.state.ticks()
        );
        transmitter.ok_or(IdleError::SchedulerPanicked)
    }

    /// Index of the frame currently being transmitted.
    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    /// The frame at [`IdleSession::current_index`], for cross-fading out of the loop.
    pub fn current_frame(&self) -> Option<&[f32]> {
        self.clip.frame(self.current_index())
    }

    /// Scheduler lifecycle phase.
    pub fn phase(&self) -> SchedulerPhase {
        self.state.phase()
    }

    /// Shared playback state, for observers that outlive this handle.
    pub const fn state(&self) -> &Arc<PlaybackState> {
        &self.state
    }

    /// The clip being played.
    pub const fn clip(&self) -> &Arc<FrameStore> {
        &self.clip
    }

    /// Tick notifications. Clone the receiver to observe from another thread.
    #[inline]
    pub const fn ticks(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// A clone of the stop signal; cancelling it stops the loop without joining.
    pub fn cancellation(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Signal the scheduler and join it if still running.
    fn shutdown(&mut self) -> Result<Option<T>> {
        self.token.cancel();
        match self.handle.take() {
            Some(handle) => handle.join().map(Some).map_err(|_| {
                // run() never reached its own Stopped transition
                self.state.set_phase(SchedulerPhase::Stopped);
                IdleError::SchedulerPanicked
            }),
            None => Ok(None),
        }
    }
}

impl<T> Drop for IdleSession<T> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("idle session shutdown: {e}");
        }
    }
}

impl<T> std::fmt::Debug for IdleSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdleSession")
            .field("clip", &self.clip)
            .field("phase", &self.state.phase())
            .field("index", &self.state.current_index())
            .finish_non_exhaustive()
    }
}
