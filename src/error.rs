use crate::host::HostId;
use std::io;
use thiserror::Error;

/// Input text that could not be turned into an address, caught before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Invalid MAC address: {0}")]
    MalformedMac(String),

    #[error("Invalid IP address: {0}")]
    MalformedAddress(String),

    #[error("Invalid port: {0}")]
    MalformedPort(String),
}

/// Failure of a single send attempt. Never retried by the sender.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Socket error: {0}")]
    Socket(#[source] io::Error),

    #[error("Transmit error: {0}")]
    Transmit(#[source] io::Error),
}

impl SendError {
    pub fn is_timeout(&self) -> bool {
        match self {
            SendError::Transmit(e) => matches!(
                e.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            ),
            SendError::Socket(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum WakeError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error("Host {0} not found")]
    HostNotFound(HostId),

    #[error("Interface error: {0}")]
    Interface(String),

    #[error("Wake task failed: {0}")]
    TaskFailed(String),
}

impl WakeError {
    pub fn is_validation_error(&self) -> bool {
        matches!(self, WakeError::Address(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, WakeError::Send(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        let err: WakeError = AddressError::MalformedPort("abc".into()).into();
        assert!(err.is_validation_error());
        assert!(!err.is_timeout());

        let err: WakeError = SendError::Socket(io::Error::from(io::ErrorKind::PermissionDenied)).into();
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_timeout_classification() {
        let timed_out = SendError::Transmit(io::Error::from(io::ErrorKind::TimedOut));
        assert!(timed_out.is_timeout());

        let would_block = SendError::Transmit(io::Error::from(io::ErrorKind::WouldBlock));
        assert!(would_block.is_timeout());

        let socket = SendError::Socket(io::Error::from(io::ErrorKind::TimedOut));
        assert!(!socket.is_timeout());

        let err: WakeError = timed_out.into();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_error_messages() {
        let err = AddressError::MalformedMac("00:11".into());
        assert_eq!(err.to_string(), "Invalid MAC address: 00:11");

        let err: WakeError = AddressError::MalformedAddress("1.2.3".into()).into();
        assert_eq!(err.to_string(), "Invalid IP address: 1.2.3");

        assert_eq!(WakeError::HostNotFound(7).to_string(), "Host 7 not found");
    }
}
