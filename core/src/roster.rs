use crate::ids::next_id;
use crate::kv::{KeyValueStore, WritePort, keys, load_list, write_json};
use crate::{Player, Team};
use log::{debug, error};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A named, id-keyed entity kept in a roster list.
pub trait RosterEntry: Clone + Serialize + DeserializeOwned {
    /// Storage key of the whole list.
    const KEY: &'static str;

    fn create(id: String, name: String) -> Self;
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl RosterEntry for Team {
    const KEY: &'static str = keys::TEAMS;

    fn create(id: String, name: String) -> Self {
        Team { id, name }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl RosterEntry for Player {
    const KEY: &'static str = keys::PLAYERS;

    fn create(id: String, name: String) -> Self {
        Player { id, name }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Insertion-ordered list of teams or players.
#[derive(Debug, Clone)]
pub struct Roster<T> {
    items: Vec<T>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: RosterEntry> Roster<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the in-memory list with the stored one. A missing key keeps
    /// the current list. Entries that do not decode are skipped; a read
    /// failure or a document that is not a list is logged and ignored.
    pub fn load(&mut self, kv: &dyn KeyValueStore) {
        match load_list::<T>(kv, T::KEY) {
            Ok(Some(items)) => {
                debug!("loaded {} entries from {}", items.len(), T::KEY);
                self.items = items;
            }
            Ok(None) => {}
            Err(e) => error!("Error loading {}: {e}", T::KEY),
        }
    }

    pub fn save(&self, port: &dyn WritePort) {
        write_json(port, T::KEY, &self.items);
    }

    /// Append a new entry. Blank names are rejected and nothing is written.
    pub fn add(&mut self, name: &str, port: &dyn WritePort) -> Option<&T> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.items.push(T::create(next_id(), name.to_string()));
        self.save(port);
        self.items.last()
    }

    /// Delete by id. Returns false (and writes nothing) for an unknown id.
    pub fn remove(&mut self, id: &str, port: &dyn WritePort) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return false;
        }
        self.save(port);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{BrokenStore, LoggedWrites, MemoryStore};

    #[test]
    fn add_trims_and_persists() {
        let port = LoggedWrites(MemoryStore::new());
        let mut teams = Roster::<Team>::new();
        let added = teams.add("  Lions  ", &port).cloned().unwrap();
        assert_eq!(added.name, "Lions");

        let raw = port.0.get(keys::TEAMS).unwrap().unwrap();
        let stored: Vec<Team> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![added]);
    }

    #[test]
    fn blank_name_is_rejected_without_a_write() {
        let port = LoggedWrites(MemoryStore::new());
        let mut players = Roster::<Player>::new();
        assert!(players.add("   ", &port).is_none());
        assert!(players.is_empty());
        assert_eq!(port.0.get(keys::PLAYERS).unwrap(), None);
    }

    #[test]
    fn remove_keeps_insertion_order_of_the_rest() {
        let port = LoggedWrites(MemoryStore::new());
        let mut teams = Roster::<Team>::new();
        for name in ["A", "B", "C"] {
            teams.add(name, &port);
        }
        let b_id = teams.items()[1].id.clone();
        assert!(teams.remove(&b_id, &port));
        let names: Vec<_> = teams.items().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert!(!teams.remove("missing", &port));
    }

    #[test]
    fn load_reads_the_stored_list_and_survives_garbage() {
        let kv = MemoryStore::new().with_entry(keys::PLAYERS, r#"[{"id":"1","name":"Ali"}]"#);
        let mut players = Roster::<Player>::new();
        players.load(&kv);
        assert_eq!(players.items()[0].name, "Ali");

        let broken = MemoryStore::new().with_entry(keys::PLAYERS, "nope");
        players.load(&broken);
        assert_eq!(players.len(), 1, "failed load must leave prior state");
    }

    #[test]
    fn store_failures_keep_the_in_memory_list() {
        let port = LoggedWrites(BrokenStore);
        let mut teams = Roster::<Team>::new();
        assert!(teams.add("Lions", &port).is_some());
        assert_eq!(teams.len(), 1);

        teams.load(&BrokenStore);
        assert_eq!(teams.items()[0].name, "Lions");
    }
}
