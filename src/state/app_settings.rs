use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

const APP_DIR: &str = "kickoff";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub data_dir: PathBuf,
    /// Keep everything in memory; nothing is written to disk.
    pub ephemeral: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            data_dir: PathBuf::from("kickoff-data"),
            ephemeral: false,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_env(|name| std::env::var(name).ok())
    }

    fn from_env(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        let log_level = non_blank("KICKOFF_LOG_LEVEL").and_then(|v| LevelFilter::from_str(v.trim()).ok());

        let data_dir = if let Some(dir) = non_blank("KICKOFF_DATA_DIR") {
            PathBuf::from(dir)
        } else if let Some(config) = non_blank("XDG_CONFIG_HOME") {
            PathBuf::from(config).join(APP_DIR)
        } else if let Some(home) = non_blank("HOME") {
            PathBuf::from(home).join(".config").join(APP_DIR)
        } else {
            Self::default().data_dir
        };

        Self { log_level, data_dir, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_env(|name| vars.get(name).cloned())
    }

    #[test]
    fn explicit_data_dir_wins() {
        let s = settings(&[("KICKOFF_DATA_DIR", "/tmp/cup"), ("HOME", "/home/me")]);
        assert_eq!(s.data_dir, PathBuf::from("/tmp/cup"));
    }

    #[test]
    fn data_dir_falls_back_through_xdg_then_home() {
        let xdg = settings(&[("XDG_CONFIG_HOME", "/cfg"), ("HOME", "/home/me")]);
        assert_eq!(xdg.data_dir, PathBuf::from("/cfg/kickoff"));

        let home = settings(&[("XDG_CONFIG_HOME", "  "), ("HOME", "/home/me")]);
        assert_eq!(home.data_dir, PathBuf::from("/home/me/.config/kickoff"));

        assert_eq!(settings(&[]).data_dir, PathBuf::from("kickoff-data"));
    }

    #[test]
    fn log_level_is_parsed_case_insensitively() {
        assert_eq!(settings(&[("KICKOFF_LOG_LEVEL", "Debug")]).log_level, Some(LevelFilter::Debug));
        assert_eq!(settings(&[("KICKOFF_LOG_LEVEL", "loud")]).log_level, None);
    }
}
