//! Scheduler: the paced loop that walks the clip and emits one frame per tick.
//!
//! Each tick publishes the index, applies the frame to the face object,
//! encodes it, and hands it to the transmitter. The remainder of the frame
//! period is slept in short slices so a stop request is honoured within one
//! slice rather than one frame.

use super::cancel::CancellationToken;
use super::state::{PlaybackState, SchedulerPhase, Tick};
use crate::clip::FrameStore;
use crate::config::IdleConfig;
use crate::livelink::FaceFrame;
use crate::transport::Transmitter;
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Drives one idle session. Owned by the scheduler thread.
pub(crate) struct Scheduler<T> {
    clip: Arc<FrameStore>,
    face: FaceFrame,
    transmitter: T,
    state: Arc<PlaybackState>,
    tick_tx: Sender<Tick>,
    period: Duration,
    slice: Duration,
    /// Reused encode buffer.
    datagram: Vec<u8>,
    /// Next frame to emit.
    position: usize,
    tick: u64,
    pass: u64,
    started: Instant,
}

impl<T: Transmitter> Scheduler<T> {
    /// Build a scheduler positioned at frame 0.
    pub(crate) fn new(
        clip: Arc<FrameStore>,
        transmitter: T,
        config: &IdleConfig,
        state: Arc<PlaybackState>,
        tick_tx: Sender<Tick>,
    ) -> Self {
        let face = FaceFrame::new(config.subject_name.clone(), config.target_fps);
        let datagram = Vec::with_capacity(face.encoded_len());
        Self {
            clip,
            face,
            transmitter,
            state,
            tick_tx,
            period: config.frame_period(),
            slice: config.sleep_slice,
            datagram,
            position: 0,
            tick: 0,
            pass: 0,
            started: Instant::now(),
        }
    }

    /// Run until `token` is cancelled, then hand the transmitter back.
    pub(crate) fn run(mut self, token: &CancellationToken) -> T {
        self.started = Instant::now();
        self.state.set_phase(SchedulerPhase::Running);
        log::info!(
            "idle loop running: {} frames at {:?} per frame",
            self.clip.len(),
            self.period
        );

        loop {
            if token.is_cancelled() {
                break;
            }

            let tick_start = Instant::now();
            self.tick();

            if !self.pace(tick_start, token) {
                break;
            }
        }

        self.state.set_phase(SchedulerPhase::Stopping);
        log::info!(
            "idle loop stopping at frame {} after {} ticks ({} dropped)",
            self.state.current_index(),
            self.tick,
            self.state.frames_dropped()
        );
        self.state.set_phase(SchedulerPhase::Stopped);
        self.transmitter
    }

    /// Emit the frame at the current position and advance, wrapping at the end.
    ///
    /// Returns the index that was emitted.
    fn tick(&mut self) -> usize {
        let index = self.position;
        self.state.publish(index);

        if let Some(frame) = self.clip.frame(index) {
            for (channel, &value) in frame.iter().enumerate() {
                self.face.set_index(channel, value);
            }
        }

        self.datagram.clear();
        self.face
            .encode_into(&mut self.datagram, self.face.timecode_frame());
        match self.transmitter.transmit(&self.datagram) {
            Ok(()) => self.state.record_sent(),
            Err(e) => {
                self.state.record_dropped();
                log::warn!("idle frame {index} dropped: {e}");
            }
        }

        // Non-blocking send - if observers lag, skip this tick
        let _ = self.tick_tx.try_send(Tick {
            tick: self.tick,
            index,
            pass: self.pass,
            elapsed: self.started.elapsed(),
        });
        self.tick += 1;
        self.state.record_tick();

        self.position += 1;
        if self.position == self.clip.len() {
            self.position = 0;
            self.pass += 1;
            self.state.record_pass();
            log::trace!("idle loop wrapped, pass {}", self.pass);
        }

        index
    }

    /// Sleep out the rest of the frame in slices.
    ///
    /// Returns `false` as soon as cancellation is seen.
    fn pace(&self, tick_start: Instant, token: &CancellationToken) -> bool {
        let deadline = tick_start + self.period;
        loop {
            if token.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(self.slice));
        }
    }
}
