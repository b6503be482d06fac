use crate::address::MacAddress;
use crate::packet::{MAGIC_PACKET_LEN, SYNC_STREAM};

/// Wake-on-LAN magic packet
/// Format:
/// 0        6        12             96       102
/// +--------+--------+---- ... -----+--------+
/// | FF x 6 |  MAC   |  MAC x 14    |  MAC   |
/// +--------+--------+---- ... -----+--------+
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicPacket {
    bytes: [u8; MAGIC_PACKET_LEN],
}

impl MagicPacket {
    pub fn new(mac: MacAddress) -> Self {
        let mut bytes = [0u8; MAGIC_PACKET_LEN];
        bytes[..SYNC_STREAM.len()].copy_from_slice(&SYNC_STREAM);

        for chunk in bytes[SYNC_STREAM.len()..].chunks_exact_mut(6) {
            chunk.copy_from_slice(mac.as_bytes());
        }

        MagicPacket { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; MAGIC_PACKET_LEN] {
        &self.bytes
    }

    pub fn target(&self) -> MacAddress {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.bytes[6..12]);
        MacAddress::new(mac)
    }

    /// Recognises a received payload as a magic packet: exact length, sync
    /// stream, and sixteen identical copies of one MAC.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != MAGIC_PACKET_LEN || bytes[..6] != SYNC_STREAM {
            return None;
        }

        let first = &bytes[6..12];
        if bytes[6..].chunks_exact(6).any(|chunk| chunk != first) {
            return None;
        }

        let mut packet = [0u8; MAGIC_PACKET_LEN];
        packet.copy_from_slice(bytes);
        Some(MagicPacket { bytes: packet })
    }
}

impl From<MacAddress> for MagicPacket {
    fn from(mac: MacAddress) -> Self {
        MagicPacket::new(mac)
    }
}

impl AsRef<[u8]> for MagicPacket {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
