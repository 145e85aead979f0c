use crate::Prize;
use crate::ids::next_id;
use crate::kv::{KeyValueStore, WritePort, keys, load_list, write_json};
use log::error;

#[derive(Debug, Clone, Default)]
pub struct PrizeStore {
    prizes: Vec<Prize>,
}

impl PrizeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn load(&mut self, kv: &dyn KeyValueStore) {
        match load_list::<Prize>(kv, keys::PRIZES) {
            Ok(Some(prizes)) => self.prizes = prizes,
            Ok(None) => {}
            Err(e) => error!("Error loading prizes: {e}"),
        }
    }

    pub fn save(&self, port: &dyn WritePort) {
        write_json(port, keys::PRIZES, &self.prizes);
    }

    /// Both place and reward are required.
    pub fn add(&mut self, place: &str, reward: &str, port: &dyn WritePort) -> Option<&Prize> {
        let (place, reward) = (place.trim(), reward.trim());
        if place.is_empty() || reward.is_empty() {
            return None;
        }
        self.prizes.push(Prize {
            id: next_id(),
            place: place.to_string(),
            reward: reward.to_string(),
        });
        self.save(port);
        self.prizes.last()
    }

    pub fn remove(&mut self, id: &str, port: &dyn WritePort) -> bool {
        let before = self.prizes.len();
        self.prizes.retain(|p| p.id != id);
        if self.prizes.len() == before {
            return false;
        }
        self.save(port);
        true
    }
}
