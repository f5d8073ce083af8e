//! Seam blending: ramp the tail of a looping clip into its head.

use super::{lerp_into, FrameStore};
use crate::error::{IdleError, Result};

impl FrameStore {
    /// Return a copy whose last `blend_frames` frames fade toward the first ones.
    ///
    /// For offset `i` in `0..blend_frames`, with `t = i / blend_frames`,
    /// frame `len - blend_frames + i` becomes
    /// `(1 - t) * tail[i] + t * head[i]`. Frames outside the window are
    /// copied untouched and `blend_frames == 0` is the identity.
    ///
    /// The window must fit twice inside the clip so head and tail never
    /// overlap; anything larger is rejected rather than clamped.
    pub fn seam_blend(&self, blend_frames: usize) -> Result<Self> {
        let len = self.len();
        if blend_frames == 0 {
            return Ok(self.clone());
        }
        if blend_frames >= len {
            return Err(IdleError::configuration(format!(
                "blend window of {blend_frames} frames must be shorter than the {len}-frame clip"
            )));
        }
        if blend_frames > len / 2 {
            return Err(IdleError::configuration(format!(
                "blend window of {blend_frames} frames overlaps itself in a {len}-frame clip (max {})",
                len / 2
            )));
        }

        let channels = self.channels;
        let tail_start = len - blend_frames;
        let mut data = self.data.clone();

        for i in 0..blend_frames {
            let t = i as f32 / blend_frames as f32;
            let head = &self.data[i * channels..(i + 1) * channels];
            let at = (tail_start + i) * channels;
            let tail = &self.data[at..at + channels];
            lerp_into(&mut data[at..at + channels], tail, head, t);
        }

        Ok(Self { channels, data })
    }
}
