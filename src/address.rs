use crate::error::AddressError;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Hardware address of the machine to wake (format xx:xx:xx:xx:xx:xx)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }
}

impl FromStr for MacAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();

        if parts.len() != 6 {
            return Err(AddressError::MalformedMac(format!(
                "'{}' must contain 6 bytes separated by ':'",
                s
            )));
        }

        let mut bytes = [0u8; 6];

        for (i, part) in parts.iter().enumerate() {
            // from_str_radix would also take a leading '+'
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(AddressError::MalformedMac(format!(
                    "'{}' is not a hexadecimal byte in '{}'",
                    part, s
                )));
            }
            bytes[i] = u8::from_str_radix(part, 16).map_err(|_| {
                AddressError::MalformedMac(format!("'{}' is not a hexadecimal byte in '{}'", part, s))
            })?;
        }

        Ok(MacAddress(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

pub fn parse_mac(text: &str) -> Result<MacAddress, AddressError> {
    text.parse()
}

/// Parses a dotted-quad IPv4 address or an IPv6 literal.
///
/// Broadcast and non-routable addresses are accepted as-is; nothing here
/// checks whether the address is reachable.
pub fn parse_ip(text: &str) -> Result<IpAddr, AddressError> {
    if text.contains(':') {
        return Ipv6Addr::from_str(text)
            .map(IpAddr::V6)
            .map_err(|_| AddressError::MalformedAddress(format!("'{}' is not an IPv6 address", text)));
    }

    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(AddressError::MalformedAddress(format!(
            "'{}' must contain 4 numbers separated by '.'",
            text
        )));
    }

    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        octets[i] = parse_decimal::<u8>(part).ok_or_else(|| {
            AddressError::MalformedAddress(format!("'{}' is not a number in 0-255 in '{}'", part, text))
        })?;
    }

    Ok(IpAddr::V4(Ipv4Addr::from(octets)))
}

pub fn parse_port(text: &str) -> Result<u16, AddressError> {
    parse_decimal::<u16>(text)
        .ok_or_else(|| AddressError::MalformedPort(format!("'{}' is not a number in 0-65535", text)))
}

// Digits only: rejects signs, whitespace and empty input that FromStr would
// partly let through.
fn parse_decimal<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
