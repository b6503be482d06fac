use crate::error::{SendError, WakeError};
use crate::packet::MagicPacket;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV6, UdpSocket};
use std::time::Duration;
use tracing::debug;

/// Sends magic packets over UDP.
///
/// Holds configuration only. Every send opens its own socket and drops it
/// before returning, so one sender can be shared freely between threads and
/// tasks.
#[derive(Debug, Clone, Default)]
pub struct WakeSender {
    timeout: Option<Duration>,
    scope_id: u32,
    bind_address: Option<IpAddr>,
}

impl WakeSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound on a single send. An expired timeout is a transmit error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        // std rejects a zero write timeout
        self.timeout = Some(timeout).filter(|t| !t.is_zero());
        self
    }

    /// Interface scope for IPv6 link-local destinations.
    pub fn with_scope_id(mut self, scope_id: u32) -> Self {
        self.scope_id = scope_id;
        self
    }

    /// Local address to send from, which selects the outgoing interface.
    pub fn with_bind_address(mut self, addr: IpAddr) -> Self {
        self.bind_address = Some(addr);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn local_addr(&self, destination: &IpAddr) -> io::Result<SocketAddr> {
        let ip = match (self.bind_address, destination) {
            (Some(bind), dest) if bind.is_ipv4() != dest.is_ipv4() => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("bind address {} does not match destination {}", bind, dest),
                ));
            }
            (Some(bind), _) => bind,
            (None, IpAddr::V4(_)) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            (None, IpAddr::V6(_)) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };
        Ok(SocketAddr::new(ip, 0))
    }

    fn remote_addr(&self, destination: IpAddr, port: u16) -> SocketAddr {
        match destination {
            IpAddr::V4(ip) => SocketAddr::from((ip, port)),
            IpAddr::V6(ip) => SocketAddr::V6(SocketAddrV6::new(ip, port, 0, self.scope_id)),
        }
    }

    fn open(&self, destination: &IpAddr) -> io::Result<UdpSocket> {
        let socket = UdpSocket::bind(self.local_addr(destination)?)?;
        if destination.is_ipv4() {
            socket.set_broadcast(true)?;
        }
        socket.set_write_timeout(self.timeout)?;
        Ok(socket)
    }

    /// Sends `packet` as one datagram to `(destination, port)`.
    ///
    /// Success only means the network stack accepted the datagram. Wake-on-LAN
    /// has no acknowledgement.
    pub fn send(&self, packet: &MagicPacket, destination: IpAddr, port: u16) -> Result<(), SendError> {
        let socket = self.open(&destination).map_err(SendError::Socket)?;
        let remote = self.remote_addr(destination, port);

        let sent = socket
            .send_to(packet.as_bytes(), remote)
            .map_err(SendError::Transmit)?;
        check_complete(sent)?;

        debug!("Sent {} byte magic packet for {} to {}", sent, packet.target(), remote);
        Ok(())
    }

    /// Same as [`WakeSender::send`] on the tokio runtime.
    pub async fn send_async(
        &self,
        packet: &MagicPacket,
        destination: IpAddr,
        port: u16,
    ) -> Result<(), SendError> {
        let local = self.local_addr(&destination).map_err(SendError::Socket)?;
        let socket = tokio::net::UdpSocket::bind(local)
            .await
            .map_err(SendError::Socket)?;
        if destination.is_ipv4() {
            socket.set_broadcast(true).map_err(SendError::Socket)?;
        }
        let remote = self.remote_addr(destination, port);

        let send = socket.send_to(packet.as_bytes(), remote);
        let sent = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, send).await.map_err(|_| {
                SendError::Transmit(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("send to {} timed out after {:?}", remote, timeout),
                ))
            })?,
            None => send.await,
        }
        .map_err(SendError::Transmit)?;
        check_complete(sent)?;

        debug!("Sent {} byte magic packet for {} to {}", sent, packet.target(), remote);
        Ok(())
    }
}

fn check_complete(sent: usize) -> Result<(), SendError> {
    let expected = crate::packet::MAGIC_PACKET_LEN;
    if sent != expected {
        return Err(SendError::Transmit(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("short write: {} of {} bytes", sent, expected),
        )));
    }
    Ok(())
}

pub fn find_interface(name: &str) -> Option<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
}

/// Directed broadcast address of the first IPv4 network on `interface`.
pub fn interface_broadcast(interface: &NetworkInterface) -> Option<Ipv4Addr> {
    interface.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) => Some(v4.broadcast()),
        IpNetwork::V6(_) => None,
    })
}

/// Looks up `name` and returns its IPv4 broadcast address.
pub fn broadcast_for_interface(name: &str) -> Result<Ipv4Addr, WakeError> {
    let interface = find_interface(name)
        .ok_or_else(|| WakeError::Interface(format!("network interface '{}' not found", name)))?;

    interface_broadcast(&interface).ok_or_else(|| {
        WakeError::Interface(format!("network interface '{}' has no IPv4 address", name))
    })
}
