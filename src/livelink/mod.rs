//! Live Link Face: the receiver's channel layout and datagram encoding.
//!
//! The scheduler only knows frames as index-addressed weight slices. This
//! module owns the mapping onto the receiver's 61 named channels and the
//! byte layout each tick emits.

mod blendshape;
mod face;

pub use blendshape::FaceBlendShape;
pub use face::{FaceFrame, PROTOCOL_VERSION};
