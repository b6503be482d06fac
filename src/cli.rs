use clap::{Error, Parser};
use std::net::IpAddr;
use std::time::Duration;
use wakeonlan::address::{self, MacAddress};

#[derive(Parser, Debug)]
#[command(name = "wakeonlan")]
#[command(about = "Send a Wake-on-LAN magic packet")]
pub struct Args {
    /// Target MAC address (format xx:xx:xx:xx:xx:xx)
    #[arg(short, long)]
    pub mac: MacAddress,

    /// Destination IP, usually the broadcast address of the target's subnet
    #[arg(long, value_parser = address::parse_ip, required_unless_present = "interface")]
    pub ip: Option<IpAddr>,

    /// Send to the broadcast address of this local interface instead of --ip
    #[arg(short, long, conflicts_with = "ip")]
    pub interface: Option<String>,

    /// Destination UDP port
    #[arg(short, long, value_parser = address::parse_port, default_value = "9")]
    pub port: u16,

    /// Give up on the send after this many milliseconds
    #[arg(short, long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Interface scope for IPv6 link-local destinations
    #[arg(long)]
    pub scope_id: Option<u32>,

    /// Log each step
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

pub fn parse_args() -> Result<Args, Error> {
    Args::try_parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parse_with_ip() {
        let args = Args::try_parse_from([
            "wakeonlan",
            "--mac",
            "00:11:22:33:44:55",
            "--ip",
            "192.168.1.255",
        ])
        .unwrap();

        assert_eq!(args.mac.as_bytes(), &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(args.ip, Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 255))));
        assert_eq!(args.port, 9);
        assert_eq!(args.timeout(), None);
    }

    #[test]
    fn test_parse_with_interface_and_port() {
        let args = Args::try_parse_from([
            "wakeonlan", "-m", "aa:bb:cc:dd:ee:ff", "-i", "eth0", "-p", "7", "-t", "250",
        ])
        .unwrap();

        assert_eq!(args.interface.as_deref(), Some("eth0"));
        assert_eq!(args.ip, None);
        assert_eq!(args.port, 7);
        assert_eq!(args.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_destination_required() {
        assert!(Args::try_parse_from(["wakeonlan", "--mac", "00:11:22:33:44:55"]).is_err());
    }

    #[test]
    fn test_ip_and_interface_conflict() {
        assert!(Args::try_parse_from([
            "wakeonlan", "--mac", "00:11:22:33:44:55", "--ip", "10.0.0.255", "-i", "eth0",
        ])
        .is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases: [&[&str]; 3] = [
            &["wakeonlan", "--mac", "00:11:22", "--ip", "10.0.0.255"],
            &["wakeonlan", "--mac", "00:11:22:33:44:55", "--ip", "10.0.0.256"],
            &["wakeonlan", "--mac", "00:11:22:33:44:55", "--ip", "10.0.0.255", "--port", "65536"],
        ];
        for argv in cases {
            assert!(Args::try_parse_from(argv.iter().copied()).is_err(), "accepted {:?}", argv);
        }
    }
}
