//! Wake-on-LAN: validate a host's addresses, build the magic packet and send
//! it over UDP.

pub mod address;
pub mod error;
pub mod host;
pub mod network;
pub mod packet;
pub mod wake;

pub use address::{parse_ip, parse_mac, parse_port, MacAddress};
pub use error::{AddressError, SendError, WakeError};
pub use host::{HostId, HostRecord, HostRepository, MemoryHostRepository};
pub use network::WakeSender;
pub use packet::{MagicPacket, DEFAULT_WOL_PORT};
pub use wake::{wake, wake_async, WakeRequest, Waker};
