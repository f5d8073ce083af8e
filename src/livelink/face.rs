//! `FaceFrame`: the receiver-facing blendshape object and its wire encoding.

use super::FaceBlendShape;
use chrono::{Local, Timelike};
use uuid::Uuid;

/// Protocol version understood by Live Link Face receivers.
pub const PROTOCOL_VERSION: u32 = 6;

/// Constant sub-frame field; receivers ignore it for UDP sources.
const SUB_FRAME: u32 = 1_056_060_032;

/// Blendshape state for one subject, ready to be encoded per tick.
///
/// The scheduler writes weights channel by channel and then calls
/// [`FaceFrame::encode_into`]; the encoding belongs to this type, not to
/// the scheduler.
#[derive(Debug, Clone)]
pub struct FaceFrame {
    uuid: String,
    name: String,
    fps: u32,
    denominator: u32,
    weights: [f32; FaceBlendShape::COUNT],
}

impl FaceFrame {
    /// Create a face with a fresh subject UUID.
    pub fn new(name: impl Into<String>, fps: u32) -> Self {
        Self {
            uuid: format!("${}", Uuid::new_v4()),
            name: name.into(),
            fps,
            denominator: 1,
            weights: [0.0; FaceBlendShape::COUNT],
        }
    }

    /// Subject name the receiver binds to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subject identifier (stable for the lifetime of this object).
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Current weight of a channel.
    #[inline]
    pub const fn blendshape(&self, shape: FaceBlendShape) -> f32 {
        self.weights[shape as usize]
    }

    /// All weights in wire order.
    #[inline]
    pub const fn weights(&self) -> &[f32; FaceBlendShape::COUNT] {
        &self.weights
    }

    /// Set one channel.
    #[inline]
    pub fn set_blendshape(&mut self, shape: FaceBlendShape, value: f32) {
        self.weights[shape as usize] = value;
    }

    /// Set a channel by raw index. Indices past the receiver's layout are ignored.
    #[inline]
    pub fn set_index(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.weights.get_mut(index) {
            *slot = value;
        }
    }

    /// Zero every channel.
    pub fn reset(&mut self) {
        self.weights = [0.0; FaceBlendShape::COUNT];
    }

    /// Timecode frame number for "now": seconds since local midnight times fps.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn timecode_frame(&self) -> u32 {
        let now = Local::now();
        let seconds = now.num_seconds_from_midnight();
        // leap seconds report nanos past 1e9
        let fractional = f64::from(now.nanosecond() % 1_000_000_000) / 1e9;
        let frames = (f64::from(seconds) + fractional) * f64::from(self.fps);
        frames as u32
    }

    /// Size in bytes of one encoded frame.
    pub fn encoded_len(&self) -> usize {
        4 + self.uuid.len() + 4 + self.name.len() + 16 + 1 + 4 * FaceBlendShape::COUNT
    }

    /// Append the encoded datagram to `out`.
    ///
    /// Layout: version (u32 LE), uuid bytes, name length (i32 BE), name
    /// bytes, frame number, sub-frame, fps, denominator (u32 BE each),
    /// channel count (u8), then every weight as f32 BE.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn encode_into(&self, out: &mut Vec<u8>, frame_number: u32) {
        out.reserve(self.encoded_len());
        out.extend_from_slice(&PROTOCOL_VERSION.to_le_bytes());
        out.extend_from_slice(self.uuid.as_bytes());
        out.extend_from_slice(&(self.name.len() as i32).to_be_bytes());
        out.extend_from_slice(self.name.as_bytes());
        out.extend_from_slice(&frame_number.to_be_bytes());
        out.extend_from_slice(&SUB_FRAME.to_be_bytes());
        out.extend_from_slice(&self.fps.to_be_bytes());
        out.extend_from_slice(&self.denominator.to_be_bytes());
        out.push(FaceBlendShape::COUNT as u8);
        for weight in &self.weights {
            out.extend_from_slice(&weight.to_be_bytes());
        }
    }

    /// Encode with the current timecode into a fresh buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out, self.timecode_frame());
        out
    }
}
