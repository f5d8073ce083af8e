//! Transport: where encoded frames go once per tick.
//!
//! The scheduler never inspects transport failures beyond logging them, so
//! a transmitter only has to report each datagram's outcome.

mod udp;

pub use udp::UdpTransmitter;

use crate::error::TransmissionError;

/// A sink for one datagram per tick on an already-open channel.
pub trait Transmitter {
    /// Write one datagram.
    ///
    /// An error means this frame was dropped; the caller decides whether
    /// that matters. Implementations must not retry.
    fn transmit(&mut self, datagram: &[u8]) -> Result<(), TransmissionError>;
}

impl<T: Transmitter + ?Sized> Transmitter for Box<T> {
    fn transmit(&mut self, datagram: &[u8]) -> Result<(), TransmissionError> {
        (**self).transmit(datagram)
    }
}

impl<T: Transmitter + ?Sized> Transmitter for &mut T {
    fn transmit(&mut self, datagram: &[u8]) -> Result<(), TransmissionError> {
        (**self).transmit(datagram)
    }
}
