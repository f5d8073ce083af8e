//! `UdpTransmitter`: connected datagram socket to a single receiver.

use super::Transmitter;
use crate::error::{IdleError, Result, TransmissionError};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

/// Fire-and-forget sender bound to an ephemeral port and connected to one peer.
///
/// Writes block without a timeout; a slow socket delays the schedule but
/// never reorders it.
#[derive(Debug)]
pub struct UdpTransmitter {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpTransmitter {
    /// Bind an ephemeral local port and connect it to `peer`.
    pub fn connect(peer: SocketAddr) -> Result<Self> {
        let local: SocketAddr = match peer {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local).map_err(|source| IdleError::Connect { peer, source })?;
        socket
            .connect(peer)
            .map_err(|source| IdleError::Connect { peer, source })?;
        log::debug!("udp transmitter connected to {peer}");
        Ok(Self { socket, peer })
    }

    /// Wrap a socket the caller already connected.
    pub fn from_socket(socket: UdpSocket) -> io::Result<Self> {
        let peer = socket.peer_addr()?;
        Ok(Self { socket, peer })
    }

    /// The connected receiver.
    pub const fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl Transmitter for UdpTransmitter {
    fn transmit(&mut self, datagram: &[u8]) -> std::result::Result<(), TransmissionError> {
        match self.socket.send(datagram) {
            Ok(sent) if sent == datagram.len() => Ok(()),
            Ok(sent) => Err(TransmissionError::new(
                datagram.len(),
                io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("short datagram write: {sent} of {} bytes", datagram.len()),
                ),
            )),
            Err(e) => Err(TransmissionError::new(datagram.len(), e)),
        }
    }
}
