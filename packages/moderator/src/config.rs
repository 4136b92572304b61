use std::env;
use std::str::FromStr;

use log::warn;

pub const DEFAULT_PREVIEW_CHARS: usize = 250;
pub const DEFAULT_TABLE_WIDTH: usize = 60;
/// Seat, name and role column shares of the status table.
pub const DEFAULT_COLUMN_RATIOS: [f64; 3] = [0.1, 0.45, 0.45];

const RATIO_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse '{value}'")]
    Unparsable { var: &'static str, value: String },

    #[error("expected 3 column ratios, got {0}")]
    RatioCount(usize),

    #[error("column ratios must be positive, got {0:?}")]
    NonPositiveRatio(Vec<f64>),

    #[error("column ratios must sum to 1, got {sum}")]
    RatioSum { sum: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeratorConfig {
    pub verbose_logging: bool,
    // print roles in `status`
    pub show_roles: bool,
    pub preview_chars: usize,
    pub table_width: usize,
    pub column_ratios: [f64; 3],
    // fill roles randomly whenever the player count changes
    pub random_roles: bool,
}

impl Default for ModeratorConfig {
    fn default() -> Self {
        Self {
            verbose_logging: cfg!(debug_assertions),
            show_roles: true,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            table_width: DEFAULT_TABLE_WIDTH,
            column_ratios: DEFAULT_COLUMN_RATIOS,
            random_roles: false,
        }
    }
}

impl ModeratorConfig {
    /// Reads every `MAFIA_*` variable. Malformed values are logged and
    /// replaced by their defaults; this never fails.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let column_ratios = match env::var("MAFIA_COLUMN_RATIOS") {
            Ok(raw) => parse_column_ratios(&raw).unwrap_or_else(|e| {
                warn!("MAFIA_COLUMN_RATIOS ignored: {e}");
                DEFAULT_COLUMN_RATIOS
            }),
            Err(_) => DEFAULT_COLUMN_RATIOS,
        };

        Self {
            verbose_logging: Self::verbose_from_env(),
            show_roles: flag("MAFIA_SHOW_ROLES", defaults.show_roles),
            preview_chars: number("MAFIA_PREVIEW_CHARS", defaults.preview_chars),
            table_width: number("MAFIA_TABLE_WIDTH", defaults.table_width),
            column_ratios,
            random_roles: flag("MAFIA_RANDOM_ROLES", defaults.random_roles),
        }
    }

    /// Needed before the logger exists, so it is readable on its own.
    pub fn verbose_from_env() -> bool {
        flag("MAFIA_VERBOSE_LOGGING", cfg!(debug_assertions))
    }

    /// Character widths of the three status columns. Every column gets at
    /// least one character.
    pub fn column_widths(&self) -> [usize; 3] {
        self.column_ratios
            .map(|ratio| ((self.table_width as f64 * ratio).floor() as usize).max(1))
    }
}

fn flag(var: &str, default: bool) -> bool {
    env::var(var).map(|v| v == "true").unwrap_or(default)
}

fn number<T: FromStr + Copy>(var: &'static str, default: T) -> T {
    match env::var(var) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            let err = ConfigError::Unparsable { var, value: raw };
            warn!("{err}, using the default");
            default
        }),
        Err(_) => default,
    }
}

pub fn parse_column_ratios(raw: &str) -> Result<[f64; 3], ConfigError> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::Unparsable {
                    var: "MAFIA_COLUMN_RATIOS",
                    value: raw.to_string(),
                })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let ratios: [f64; 3] = values
        .clone()
        .try_into()
        .map_err(|_| ConfigError::RatioCount(values.len()))?;
    if ratios.iter().any(|r| *r <= 0.0) {
        return Err(ConfigError::NonPositiveRatio(values));
    }
    let sum: f64 = ratios.iter().sum();
    if (sum - 1.0).abs() > RATIO_TOLERANCE {
        return Err(ConfigError::RatioSum { sum });
    }
    Ok(ratios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn ratios_must_sum_to_one() {
        assert_eq!(parse_column_ratios("0.2, 0.4, 0.4"), Ok([0.2, 0.4, 0.4]));
        assert!(matches!(
            parse_column_ratios("0.5,0.5,0.5"),
            Err(ConfigError::RatioSum { .. })
        ));
        assert_eq!(
            parse_column_ratios("0.5,0.5"),
            Err(ConfigError::RatioCount(2))
        );
        assert!(matches!(
            parse_column_ratios("1.2,-0.1,-0.1"),
            Err(ConfigError::NonPositiveRatio(_))
        ));
        assert!(matches!(
            parse_column_ratios("a,b,c"),
            Err(ConfigError::Unparsable { .. })
        ));
    }

    #[test]
    fn column_widths_follow_ratios() {
        let config = ModeratorConfig::default();
        assert_eq!(config.column_widths(), [6, 27, 27]);
    }

    #[test]
    #[serial]
    fn bad_ratios_fall_back_to_default() {
        env::set_var("MAFIA_COLUMN_RATIOS", "0.3,0.3,0.3");
        env::set_var("MAFIA_PREVIEW_CHARS", "many");
        let config = ModeratorConfig::from_env();
        env::remove_var("MAFIA_COLUMN_RATIOS");
        env::remove_var("MAFIA_PREVIEW_CHARS");

        assert_eq!(config.column_ratios, DEFAULT_COLUMN_RATIOS);
        assert_eq!(config.preview_chars, DEFAULT_PREVIEW_CHARS);
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        env::set_var("MAFIA_SHOW_ROLES", "false");
        env::set_var("MAFIA_TABLE_WIDTH", "80");
        env::set_var("MAFIA_RANDOM_ROLES", "true");
        let config = ModeratorConfig::from_env();
        env::remove_var("MAFIA_SHOW_ROLES");
        env::remove_var("MAFIA_TABLE_WIDTH");
        env::remove_var("MAFIA_RANDOM_ROLES");

        assert!(!config.show_roles);
        assert_eq!(config.table_width, 80);
        assert!(config.random_roles);
    }
}
