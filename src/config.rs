use crate::types::CfdParameters;
use std::env;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Instruments to evaluate.
    pub symbols: Vec<String>,
    /// Data-fetch lookback period (provider range syntax, e.g. "3mo").
    pub lookback: String,
    /// Bar interval (e.g. "1m").
    pub interval: String,
    /// Leveraged position parameters.
    pub cfd: CfdParameters,
    /// SQLite database file for recommendation history.
    pub database_path: String,
    /// Refresh interval in seconds (0 = evaluate once and exit).
    pub refresh_secs: u64,
    /// Number of stored recommendations to print after each scan.
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: vec!["GC=F".to_string()],
            lookback: "3mo".to_string(),
            interval: "1m".to_string(),
            cfd: CfdParameters::default(),
            database_path: "trading_recommendations.db".to_string(),
            refresh_secs: 0,
            recent_limit: 5,
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Split a comma-separated symbol list, dropping blanks.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let symbols = env::var("SYMBOLS")
            .ok()
            .map(|s| parse_symbols(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.symbols);

        Self {
            symbols,
            lookback: env::var("LOOKBACK").unwrap_or(defaults.lookback),
            interval: env::var("INTERVAL").unwrap_or(defaults.interval),
            cfd: CfdParameters {
                margin: parsed("CFD_MARGIN", defaults.cfd.margin),
                leverage: parsed("CFD_LEVERAGE", defaults.cfd.leverage),
                position_size: parsed("CFD_POSITION_SIZE", defaults.cfd.position_size),
            },
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            refresh_secs: parsed("REFRESH_SECS", defaults.refresh_secs),
            recent_limit: parsed("RECENT_LIMIT", defaults.recent_limit),
        }
    }

    /// Periodic refresh interval, if enabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_secs > 0).then(|| Duration::from_secs(self.refresh_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.symbols, vec!["GC=F"]);
        assert_eq!(config.lookback, "3mo");
        assert_eq!(config.interval, "1m");
        assert_eq!(config.cfd, CfdParameters::default());
        assert_eq!(config.recent_limit, 5);
        assert!(config.refresh_interval().is_none());
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!(parse_symbols("AAPL, msft ,,GC=F"), vec!["AAPL", "msft", "GC=F"]);
        assert!(parse_symbols(" , ").is_empty());
    }

    #[test]
    fn test_refresh_interval() {
        let config = Config {
            refresh_secs: 60,
            ..Config::default()
        };
        assert_eq!(config.refresh_interval(), Some(Duration::from_secs(60)));
    }
}
