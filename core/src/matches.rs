use crate::ids::next_id;
use crate::kv::{KeyValueStore, WritePort, keys, load_list, write_json};
use crate::{LogoRef, Match, Side};
use log::{debug, error};
use std::fmt;

/// What the image picker is asked to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickRequest {
    pub single: bool,
    pub editable: bool,
    /// Crop aspect as (width, height).
    pub aspect: (u16, u16),
}

impl PickRequest {
    /// Team logos: one image, square crop.
    pub const LOGO: PickRequest = PickRequest { single: true, editable: true, aspect: (1, 1) };
}

/// Image-selection service. `None` means the user cancelled.
pub trait ImagePicker {
    fn pick_image(&mut self, request: &PickRequest) -> Option<LogoRef>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    MissingTeamNames,
    MissingLogo(Side),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::MissingTeamNames => write!(f, "Enter team names first!"),
            MatchError::MissingLogo(side) => {
                write!(f, "Both teams need a logo! ({} logo was not picked)", side.label())
            }
        }
    }
}

impl std::error::Error for MatchError {}

#[derive(Debug, Clone, Default)]
pub struct MatchStore {
    matches: Vec<Match>,
}

impl MatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn load(&mut self, kv: &dyn KeyValueStore) {
        match load_list::<Match>(kv, keys::MATCHES) {
            Ok(Some(matches)) => {
                debug!("loaded {} matches", matches.len());
                self.matches = matches;
            }
            Ok(None) => {}
            Err(e) => error!("Error loading matches: {e}"),
        }
    }

    pub fn save(&self, port: &dyn WritePort) {
        write_json(port, keys::MATCHES, &self.matches);
    }

    /// Record a new unplayed fixture. The picker is asked for the home logo,
    /// then the away logo; if either is cancelled nothing is recorded.
    pub fn create(
        &mut self,
        home_name: &str,
        away_name: &str,
        picker: &mut dyn ImagePicker,
        port: &dyn WritePort,
    ) -> Result<&Match, MatchError> {
        let (home_name, away_name) = (home_name.trim(), away_name.trim());
        if home_name.is_empty() || away_name.is_empty() {
            return Err(MatchError::MissingTeamNames);
        }

        let home_logo = picker
            .pick_image(&PickRequest::LOGO)
            .ok_or(MatchError::MissingLogo(Side::Home))?;
        let away_logo = picker
            .pick_image(&PickRequest::LOGO)
            .ok_or(MatchError::MissingLogo(Side::Away))?;

        self.matches.push(Match {
            id: next_id(),
            home_logo,
            away_logo,
            home_name: home_name.to_string(),
            away_name: away_name.to_string(),
            home_score: String::new(),
            away_score: String::new(),
        });
        self.save(port);
        Ok(&self.matches[self.matches.len() - 1])
    }

    /// Overwrite one score field with the text as typed.
    pub fn set_score(&mut self, id: &str, side: Side, value: &str, port: &dyn WritePort) -> bool {
        let Some(m) = self.matches.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        match side {
            Side::Home => m.home_score = value.to_string(),
            Side::Away => m.away_score = value.to_string(),
        }
        self.save(port);
        true
    }

    pub fn remove(&mut self, id: &str, port: &dyn WritePort) -> bool {
        let before = self.matches.len();
        self.matches.retain(|m| m.id != id);
        if self.matches.len() == before {
            return false;
        }
        self.save(port);
        true
    }

    /// Drop every match and delete the stored document outright.
    pub fn clear_all(&mut self, port: &dyn WritePort) {
        self.matches.clear();
        port.remove(keys::MATCHES);
    }
}
