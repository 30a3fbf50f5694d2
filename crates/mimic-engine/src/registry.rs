//! Host-authoritative settings replicated to every participant.
//!
//! Each entry is a `watch` cell that starts empty and is written once by the
//! host. A [`RegistryMirror`] subscribes to every cell: a mirror made before
//! the write sees it arrive, a mirror made after sees the current value
//! straight away.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use mimic_core::{
    ActorProfile, Entry, FlagLookup, RegistryKey, RegistrySnapshot, RegistryValue, Roster,
};
use tokio::sync::watch;

use crate::error::RegistryError;

/// Whether this participant owns the authoritative state.
pub trait SessionRole: Send + Sync {
    fn is_host(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticRole(pub bool);

impl StaticRole {
    pub const HOST: StaticRole = StaticRole(true);
    pub const CLIENT: StaticRole = StaticRole(false);
}

impl SessionRole for StaticRole {
    fn is_host(&self) -> bool {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Published { entries: usize },
    NotHost,
}

type Cell = Option<RegistryValue>;

pub struct ReplicatedStateRegistry {
    cells: BTreeMap<RegistryKey, watch::Sender<Cell>>,
    propagated: AtomicBool,
}

impl ReplicatedStateRegistry {
    /// One cell per roster category plus the global keys, all uninitialized.
    pub fn new(roster: &Roster) -> Self {
        let keys = roster
            .iter()
            .map(|entry| RegistryKey::Category(entry.category.clone()))
            .chain(RegistryKey::GLOBALS);

        let cells = keys
            .map(|key| {
                let (tx, _rx) = watch::channel(None);
                (key, tx)
            })
            .collect();

        Self {
            cells,
            propagated: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Write every entry from `snapshot` if this participant is the host.
    ///
    /// Writes happen once per session. Entries the snapshot has no value for
    /// stay uninitialized and are reported as [`RegistryError::Incomplete`].
    /// The mirror then never becomes ready, so no actor is given a voice.
    pub fn propagate(
        &self,
        role: &dyn SessionRole,
        snapshot: &RegistrySnapshot,
    ) -> Result<Propagation, RegistryError> {
        if !role.is_host() {
            tracing::debug!("not host; waiting for replicated settings");
            return Ok(Propagation::NotHost);
        }
        if self.propagated.swap(true, Ordering::AcqRel) {
            return Err(RegistryError::AlreadyInitialized);
        }

        let mut written = 0usize;
        for (key, cell) in &self.cells {
            if let Some(value) = snapshot.value(key) {
                cell.send_replace(Some(value));
                tracing::debug!("{key} = {value}");
                written += 1;
            }
        }

        let missing = self.uninitialized_keys();
        if !missing.is_empty() {
            let err = RegistryError::Incomplete { missing };
            tracing::error!("{err}");
            return Err(err);
        }

        tracing::info!(entries = written, "voice settings propagated");
        Ok(Propagation::Published { entries: written })
    }

    pub fn uninitialized_keys(&self) -> Vec<String> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.borrow().is_none())
            .map(|(key, _)| key.to_string())
            .collect()
    }

    pub fn mirror(&self) -> RegistryMirror {
        RegistryMirror {
            cells: self
                .cells
                .iter()
                .map(|(key, cell)| (key.clone(), cell.subscribe()))
                .collect(),
        }
    }
}

/// Read-only view of the registry for one participant.
#[derive(Clone)]
pub struct RegistryMirror {
    cells: BTreeMap<RegistryKey, watch::Receiver<Cell>>,
}

impl RegistryMirror {
    pub fn entry(&self, key: &RegistryKey) -> Entry<RegistryValue> {
        match self.cells.get(key) {
            None => Entry::Absent,
            Some(rx) => match *rx.borrow() {
                Some(value) => Entry::Ready(value),
                None => Entry::Uninitialized,
            },
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&RegistryKey, Entry<RegistryValue>)> {
        self.cells.keys().map(|key| (key, self.entry(key)))
    }

    pub fn frequency(&self) -> Option<f32> {
        match self.entry(&RegistryKey::VoiceLineFrequency) {
            Entry::Ready(RegistryValue::Float(f)) => Some(f),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cells.values().all(|rx| rx.borrow().is_some())
    }

    pub fn is_eligible(&self, profile: &ActorProfile) -> bool {
        mimic_core::is_eligible(self, profile)
    }

    /// Wait until every entry holds a value. Returns `false` if the
    /// registry went away first.
    pub async fn ready(&self) -> bool {
        for rx in self.cells.values() {
            let mut rx = rx.clone();
            if rx.wait_for(Option::is_some).await.is_err() {
                return false;
            }
        }
        true
    }
}

impl FlagLookup for RegistryMirror {
    fn flag(&self, key: &RegistryKey) -> Entry<bool> {
        match self.entry(key) {
            Entry::Absent => Entry::Absent,
            Entry::Ready(RegistryValue::Bool(b)) => Entry::Ready(b),
            // A float where a flag is expected is as good as unset.
            Entry::Ready(RegistryValue::Float(_)) | Entry::Uninitialized => Entry::Uninitialized,
        }
    }
}
