//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

const DEFAULT_PARTY: [&str; 3] = ["Knight", "Mage", "Cleric"];

/// How battle events are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventFormat {
    /// One narrative sentence per event.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Content root. The bundled sample data is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Let the AI play the party too.
    pub auto: bool,
    /// Arena to fight in. A random one is picked when unset.
    pub arena: Option<String>,
    pub party: Vec<String>,
    pub log_dir: Option<PathBuf>,
    pub event_format: EventFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            auto: false,
            arena: None,
            party: DEFAULT_PARTY.iter().map(|name| name.to_string()).collect(),
            log_dir: None,
            event_format: EventFormat::Text,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Content directory (default: bundled data)
    /// - `BATTLE_AUTO` - Drive the party with the AI (default: false)
    /// - `BATTLE_ARENA` - Arena name (default: random)
    /// - `BATTLE_PARTY` - Comma-separated party members (default: Knight, Mage, Cleric)
    /// - `BATTLE_LOG_DIR` - Also write logs to `<dir>/arena-sim.log`
    /// - `BATTLE_EVENT_FORMAT` - `text` or `json` (default: text)
    ///
    /// Battle rule overrides (`BATTLE_SEED`, `BATTLE_ROUND_LIMIT`, ...) are read
    /// by the runtime configuration.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("BATTLE_DATA_DIR").ok().map(PathBuf::from);

        if let Some(auto) = read_env::<bool>("BATTLE_AUTO") {
            config.auto = auto;
        } else if env::var("BATTLE_AUTO").is_ok() {
            // Accept just setting the variable without value as "true"
            config.auto = true;
        }

        config.arena = env::var("BATTLE_ARENA")
            .ok()
            .filter(|name| !name.trim().is_empty());

        if let Ok(party) = env::var("BATTLE_PARTY") {
            let party = parse_party(&party);
            if !party.is_empty() {
                config.party = party;
            }
        }

        config.log_dir = env::var("BATTLE_LOG_DIR").ok().map(PathBuf::from);

        if let Ok(format) = env::var("BATTLE_EVENT_FORMAT") {
            config.event_format = parse_format(&format).unwrap_or_default();
        }

        config
    }
}

fn parse_party(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_format(raw: &str) -> Option<EventFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "text" => Some(EventFormat::Text),
        "json" => Some(EventFormat::Json),
        _ => None,
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
