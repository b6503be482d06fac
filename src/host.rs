use crate::error::WakeError;
use std::collections::BTreeMap;

pub type HostId = u64;

/// A stored host as entered by the user. Fields are kept as raw text and only
/// validated when the host is woken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRecord {
    pub hostname: String,
    pub mac: String,
    pub ip: String,
    pub port: String,
}

impl HostRecord {
    pub fn new(
        hostname: impl Into<String>,
        mac: impl Into<String>,
        ip: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        HostRecord {
            hostname: hostname.into(),
            mac: mac.into(),
            ip: ip.into(),
            port: port.into(),
        }
    }
}

/// Storage for host records. Any engine can sit behind it.
pub trait HostRepository {
    fn create(&mut self, record: HostRecord) -> Result<HostId, WakeError>;
    fn read(&self, id: HostId) -> Result<HostRecord, WakeError>;
    fn update(&mut self, id: HostId, record: HostRecord) -> Result<(), WakeError>;
    fn delete(&mut self, id: HostId) -> Result<(), WakeError>;
    fn list_all(&self) -> Result<Vec<(HostId, HostRecord)>, WakeError>;
}

/// In-memory repository. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryHostRepository {
    hosts: BTreeMap<HostId, HostRecord>,
    last_id: HostId,
}

impl MemoryHostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl HostRepository for MemoryHostRepository {
    fn create(&mut self, record: HostRecord) -> Result<HostId, WakeError> {
        self.last_id += 1;
        self.hosts.insert(self.last_id, record);
        Ok(self.last_id)
    }

    fn read(&self, id: HostId) -> Result<HostRecord, WakeError> {
        self.hosts.get(&id).cloned().ok_or(WakeError::HostNotFound(id))
    }

    fn update(&mut self, id: HostId, record: HostRecord) -> Result<(), WakeError> {
        let slot = self.hosts.get_mut(&id).ok_or(WakeError::HostNotFound(id))?;
        *slot = record;
        Ok(())
    }

    fn delete(&mut self, id: HostId) -> Result<(), WakeError> {
        self.hosts
            .remove(&id)
            .map(|_| ())
            .ok_or(WakeError::HostNotFound(id))
    }

    fn list_all(&self) -> Result<Vec<(HostId, HostRecord)>, WakeError> {
        Ok(self
            .hosts
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> HostRecord {
        HostRecord::new("desktop", "00:11:22:33:44:55", "192.168.1.255", "9")
    }

    #[test]
    fn test_create_and_read() {
        let mut repo = MemoryHostRepository::new();
        let id = repo.create(desktop()).unwrap();

        assert_eq!(id, 1);
        assert_eq!(repo.read(id).unwrap(), desktop());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_keeps_fields_by_name() {
        let mut repo = MemoryHostRepository::new();
        let id = repo.create(desktop()).unwrap();

        let mut edited = repo.read(id).unwrap();
        edited.ip = "10.0.0.255".to_string();
        repo.update(id, edited).unwrap();

        let stored = repo.read(id).unwrap();
        assert_eq!(stored.hostname, "desktop");
        assert_eq!(stored.mac, "00:11:22:33:44:55");
        assert_eq!(stored.ip, "10.0.0.255");
        assert_eq!(stored.port, "9");
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut repo = MemoryHostRepository::new();
        let first = repo.create(desktop()).unwrap();
        repo.delete(first).unwrap();
        let second = repo.create(desktop()).unwrap();

        assert!(second > first);
        assert!(matches!(repo.read(first), Err(WakeError::HostNotFound(id)) if id == first));
    }

    #[test]
    fn test_missing_host() {
        let mut repo = MemoryHostRepository::new();

        assert!(matches!(repo.read(42), Err(WakeError::HostNotFound(42))));
        assert!(matches!(repo.update(42, desktop()), Err(WakeError::HostNotFound(42))));
        assert!(matches!(repo.delete(42), Err(WakeError::HostNotFound(42))));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_list_all_in_id_order() {
        let mut repo = MemoryHostRepository::new();
        let a = repo.create(HostRecord::new("a", "00:00:00:00:00:01", "10.0.0.1", "9")).unwrap();
        let b = repo.create(HostRecord::new("b", "00:00:00:00:00:02", "10.0.0.2", "7")).unwrap();

        let all = repo.list_all().unwrap();
        let ids: Vec<HostId> = all.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(all[1].1.hostname, "b");
    }
}
