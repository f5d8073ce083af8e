//! Clip: the immutable frame store the idle loop plays.
//!
//! A clip is built once at startup (load, then seam-blend) and shared
//! read-only with the scheduler thread:
//!
//! ```text
//! ┌──────────┐  load   ┌────────────┐  seam_blend  ┌────────────┐
//! │ CSV file │ ──────▶ │ FrameStore │ ───────────▶ │ FrameStore │ ──▶ scheduler
//! └──────────┘         └────────────┘              └────────────┘
//! ```

mod crossfade;
mod loader;
mod seam;

pub use crossfade::crossfade;
pub use loader::{load, load_reader, EYE_CHANNELS, METADATA_COLUMNS};

use crate::error::{IdleError, Result};
use crate::livelink::FaceBlendShape;
use std::path::Path;

/// Ordered, fixed-width animation frames stored contiguously.
///
/// Invariants: at least one frame, at least one channel, and every frame
/// has exactly [`FrameStore::channels`] weights. There are no mutators;
/// transforms return a new store.
#[derive(Clone, PartialEq)]
pub struct FrameStore {
    /// Weights per frame.
    channels: usize,
    /// Row-major weights: frame `i` is `data[i * channels..(i + 1) * channels]`.
    data: Vec<f32>,
}

impl FrameStore {
    /// Build a store from in-memory frames.
    ///
    /// Fails if there are no frames, frames are empty, widths differ, or
    /// frames are wider than the receiver's [`FaceBlendShape::COUNT`] channels.
    pub fn from_frames<I, F>(frames: I) -> Result<Self>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[f32]>,
    {
        let mut channels = None;
        let mut data = Vec::new();

        for (index, frame) in frames.into_iter().enumerate() {
            let frame = frame.as_ref();
            let expected = *channels.get_or_insert(frame.len());
            if frame.len() != expected {
                return Err(IdleError::configuration(format!(
                    "frame {index} has {} channels, expected {expected}",
                    frame.len()
                )));
            }
            data.extend_from_slice(frame);
        }

        match channels {
            None => Err(IdleError::configuration("clip has no frames")),
            Some(0) => Err(IdleError::configuration("clip frames have no channels")),
            Some(channels) if channels > FaceBlendShape::COUNT => {
                Err(IdleError::configuration(format!(
                    "clip frames have {channels} channels, receiver accepts at most {}",
                    FaceBlendShape::COUNT
                )))
            }
            Some(channels) => Ok(Self { channels, data }),
        }
    }

    /// Wrap already-validated flat data.
    pub(crate) fn from_flat(channels: usize, data: Vec<f32>) -> Self {
        debug_assert!(channels > 0 && !data.is_empty() && data.len() % channels == 0);
        Self { channels, data }
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.channels
    }

    /// Always `false`: construction rejects empty clips.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Weights per frame.
    #[inline]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Frame at `index`, if in range.
    #[inline]
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.channels)?;
        self.data.get(start..start + self.channels)
    }

    /// Iterate frames in playback order.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.channels)
    }

    /// Zero the given channel in every frame; indices past the width are skipped.
    fn zero_channels(&mut self, indices: &[usize]) {
        let channels = self.channels;
        for frame in self.data.chunks_exact_mut(channels) {
            for &index in indices {
                if let Some(slot) = frame.get_mut(index) {
                    *slot = 0.0;
                }
            }
        }
    }
}

impl std::fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameStore({} frames x {} channels)", self.len(), self.channels)
    }
}

impl<'a> IntoIterator for &'a FrameStore {
    type Item = &'a [f32];
    type IntoIter = std::slice::ChunksExact<'a, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Load a clip and blend its loop seam: the full startup construction.
///
/// Either step failing aborts; no partially built store escapes.
pub fn prepare(path: impl AsRef<Path>, blend_frames: usize) -> Result<FrameStore> {
    let store = load(path)?;
    store.seam_blend(blend_frames)
}

/// Linear interpolation of `a` toward `b` by `t`, written into `out`.
#[inline]
fn lerp_into(out: &mut [f32], a: &[f32], b: &[f32], t: f32) {
    for ((o, &a), &b) in out.iter_mut().zip(a).zip(b) {
        *o = (1.0 - t).mul_add(a, t * b);
    }
}
