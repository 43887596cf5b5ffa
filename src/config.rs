use crate::domain::BonusFamily;
use crate::engine::{PlacePaytable, RebetSettings};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Settings snapshot the engine treats as input.
#[derive(Debug, Clone)]
pub struct Config {
    pub starting_balance: u64,
    pub rebet: RebetSettings,
    pub bonus_wagers: BTreeSet<BonusFamily>,
    pub place_paytable: PlacePaytable,
    /// Where the replay binary keeps its session record, if anywhere.
    pub session_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            starting_balance: 1000,
            rebet: RebetSettings::default(),
            bonus_wagers: all_bonus_wagers(),
            place_paytable: PlacePaytable::standard(),
            session_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let starting_balance = env_map
            .get("STARTING_BALANCE")
            .map(|s| s.as_str())
            .unwrap_or("1000")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "STARTING_BALANCE".to_string(),
                    "must be a non-negative integer".to_string(),
                )
            })?;

        let rebet_enabled = parse_bool(&env_map, "REBET_ENABLED", false)?;

        let rebet_amount = env_map
            .get("REBET_AMOUNT")
            .map(|s| s.as_str())
            .unwrap_or("0")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "REBET_AMOUNT".to_string(),
                    "must be a non-negative integer".to_string(),
                )
            })?;

        let bonus_wagers = parse_bonus_wagers_from_map(&env_map)?;

        let place_paytable = match env_map
            .get("PLACE_PAYTABLE")
            .map(|s| s.as_str())
            .unwrap_or("standard")
        {
            "standard" => PlacePaytable::standard(),
            "true_odds" => PlacePaytable::true_odds(),
            other => {
                return Err(ConfigError::InvalidValue(
                    "PLACE_PAYTABLE".to_string(),
                    format!("must be standard or true_odds, got {}", other),
                ))
            }
        };

        let session_path = env_map
            .get("SESSION_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Config {
            starting_balance,
            rebet: RebetSettings {
                enabled: rebet_enabled,
                amount: rebet_amount,
            },
            bonus_wagers,
            place_paytable,
            session_path,
        })
    }

    pub fn is_enabled(&self, family: BonusFamily) -> bool {
        self.bonus_wagers.contains(&family)
    }
}

fn all_bonus_wagers() -> BTreeSet<BonusFamily> {
    [
        BonusFamily::Hardway,
        BonusFamily::Horn,
        BonusFamily::Field,
        BonusFamily::MakeEm,
    ]
    .into_iter()
    .collect()
}

fn parse_bool(
    env_map: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    match env_map.get(key).map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidValue(
                key.to_string(),
                format!("must be true or false, got {}", other),
            )),
        },
    }
}

fn parse_bonus_wagers_from_map(
    env_map: &HashMap<String, String>,
) -> Result<BTreeSet<BonusFamily>, ConfigError> {
    let Some(list) = env_map.get("BONUS_WAGERS") else {
        return Ok(all_bonus_wagers());
    };
    list.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<BonusFamily>()
                .map_err(|e| ConfigError::InvalidValue("BONUS_WAGERS".to_string(), e))
        })
        .collect()
}
