/// Tournament details as typed on the home form. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentDetails {
    pub name: String,
    pub venue: String,
    pub teams: String,
    pub start_date: String,
    pub end_date: String,
}

impl TournamentDetails {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// What the details screen shows; blank fields fall back to fixed defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub name: String,
    pub venue: String,
    pub teams: String,
    pub start_date: String,
    pub end_date: String,
}

impl DetailsView {
    pub const DEFAULT_NAME: &'static str = "Sadpara Super Cup";
    pub const DEFAULT_VENUE: &'static str = "Sadpara Park";
    pub const DEFAULT_TEAMS: &'static str = "10 Teams";
    pub const DEFAULT_START: &'static str = "10-09-2025";
    pub const DEFAULT_END: &'static str = "10-10-2025";
}

impl From<&TournamentDetails> for DetailsView {
    fn from(d: &TournamentDetails) -> Self {
        Self {
            name: or_default(&d.name, Self::DEFAULT_NAME),
            venue: or_default(&d.venue, Self::DEFAULT_VENUE),
            teams: or_default(&d.teams, Self::DEFAULT_TEAMS),
            start_date: or_default(&d.start_date, Self::DEFAULT_START),
            end_date: or_default(&d.end_date, Self::DEFAULT_END),
        }
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() { default } else { value }.to_string()
}
