pub mod magic;

pub use magic::MagicPacket;

/// Conventional Wake-on-LAN port (discard service). Any port works.
pub const DEFAULT_WOL_PORT: u16 = 9;
pub const SYNC_STREAM: [u8; 6] = [0xFF; 6];
pub const MAC_REPETITIONS: usize = 16;
pub const MAGIC_PACKET_LEN: usize = SYNC_STREAM.len() + MAC_REPETITIONS * 6;
