use crate::address::{self, MacAddress};
use crate::error::{AddressError, WakeError};
use crate::host::{HostId, HostRecord, HostRepository};
use crate::network::WakeSender;
use crate::packet::MagicPacket;
use std::collections::HashMap;
use std::net::IpAddr;
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, warn};

/// A fully validated wake target. Only this reaches the network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeRequest {
    pub mac: MacAddress,
    pub ip: IpAddr,
    pub port: u16,
}

impl WakeRequest {
    pub fn new(mac: MacAddress, ip: IpAddr, port: u16) -> Self {
        WakeRequest { mac, ip, port }
    }

    /// Validates mac, ip and port, in that order.
    pub fn from_record(record: &HostRecord) -> Result<Self, AddressError> {
        Ok(WakeRequest {
            mac: address::parse_mac(&record.mac)?,
            ip: address::parse_ip(&record.ip)?,
            port: address::parse_port(&record.port)?,
        })
    }

    pub fn packet(&self) -> MagicPacket {
        MagicPacket::new(self.mac)
    }
}

pub fn wake(request: &WakeRequest, sender: &WakeSender) -> Result<(), WakeError> {
    sender.send(&request.packet(), request.ip, request.port)?;
    Ok(())
}

pub async fn wake_async(request: &WakeRequest, sender: &WakeSender) -> Result<(), WakeError> {
    sender
        .send_async(&request.packet(), request.ip, request.port)
        .await?;
    Ok(())
}

/// Wakes hosts stored in a repository.
pub struct Waker<R: HostRepository> {
    repository: R,
    sender: WakeSender,
}

impl<R: HostRepository> Waker<R> {
    pub fn new(repository: R, sender: WakeSender) -> Self {
        Waker { repository, sender }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn sender(&self) -> &WakeSender {
        &self.sender
    }

    pub fn wake_record(&self, record: &HostRecord) -> Result<(), WakeError> {
        let request = WakeRequest::from_record(record)?;
        debug!("Waking {} ({}) via {}:{}", record.hostname, request.mac, request.ip, request.port);
        wake(&request, &self.sender)
    }

    pub fn wake_host(&self, id: HostId) -> Result<(), WakeError> {
        let record = self.repository.read(id)?;
        self.wake_record(&record)
    }

    /// Sends to every stored host at once, one task per host. Results come
    /// back sorted by host id; the order of the sends is unspecified.
    pub async fn wake_all(&self) -> Result<Vec<(HostId, Result<(), WakeError>)>, WakeError> {
        let mut results: Vec<(HostId, Result<(), WakeError>)> = Vec::new();
        let mut tasks = JoinSet::new();
        let mut hosts = HashMap::new();

        for (id, record) in self.repository.list_all()? {
            match WakeRequest::from_record(&record) {
                Ok(request) => {
                    let sender = self.sender.clone();
                    let handle = tasks.spawn(async move { wake_async(&request, &sender).await });
                    hosts.insert(handle.id(), id);
                }
                Err(e) => results.push((id, Err(e.into()))),
            }
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            results.extend(task_outcome(&hosts, joined));
        }

        for (id, result) in &results {
            if let Err(e) = result {
                warn!("Failed to wake host {}: {}", id, e);
            }
        }

        results.sort_by_key(|(id, _)| *id);
        Ok(results)
    }
}

type TaskResult = Result<(task::Id, Result<(), WakeError>), JoinError>;

// A panicked or cancelled task still yields an outcome for its host.
fn task_outcome(
    hosts: &HashMap<task::Id, HostId>,
    joined: TaskResult,
) -> Option<(HostId, Result<(), WakeError>)> {
    match joined {
        Ok((task, result)) => hosts.get(&task).map(|id| (*id, result)),
        Err(e) => hosts
            .get(&e.id())
            .map(|id| (*id, Err(WakeError::TaskFailed(e.to_string())))),
    }
}
