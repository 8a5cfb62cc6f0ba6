//! Configuration management for the BSJP scanner.
//!
//! The scanner reads a single JSON file at `~/.bsjp/config.json` unless an
//! explicit path is given.
//!
//! # Configuration Priority
//!
//! 1. Explicit config file values
//! 2. Environment variables (BSJP_* prefix)
//! 3. Default values
//!
//! Command-line flags are applied by the binary on top of all three.
//!
//! # Environment Variable Mapping
//!
//! - `BSJP_LOG_LEVEL` → observability.log_level
//! - `BSJP_LOG_FORMAT` → observability.log_format
//! - `BSJP_SEED` → generator.seed
//! - `BSJP_DISPLAY_LIMIT` → display.display_limit

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".bsjp"),
        |dirs| dirs.home_dir().join(".bsjp"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Universe
// ============================================================================

/// Identity of one ticker in the scan universe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker {
    /// Exchange code (e.g., "BBCA")
    pub symbol: String,
    /// Display name
    pub name: String,
}

impl Ticker {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// IDX blue chips and liquid second liners scanned when no universe is configured.
const DEFAULT_UNIVERSE: &[(&str, &str)] = &[
    ("BBCA", "Bank Central Asia"),
    ("BBRI", "Bank Rakyat Indonesia"),
    ("BMRI", "Bank Mandiri"),
    ("TLKM", "Telkom Indonesia"),
    ("ASII", "Astra International"),
    ("UNVR", "Unilever Indonesia"),
    ("ICBP", "Indofood CBP"),
    ("GOTO", "GoTo Gojek Tokopedia"),
    ("BUKA", "Bukalapak"),
    ("ARTO", "Bank Jago"),
    ("EMTK", "Elang Mahkota"),
    ("MDKA", "Merdeka Copper Gold"),
    ("ANTM", "Aneka Tambang"),
    ("INCO", "Vale Indonesia"),
    ("PTBA", "Bukit Asam"),
    ("ADRO", "Adaro Energy"),
    ("ITMG", "Indo Tambangraya"),
    ("PGAS", "Perusahaan Gas Negara"),
    ("JSMR", "Jasa Marga"),
    ("CPIN", "Charoen Pokphand"),
    ("JPFA", "Japfa Comfeed"),
    ("ACES", "Ace Hardware"),
    ("ERAA", "Erajaya Swasembada"),
    ("MAPA", "MAP Aktif Adiperkasa"),
    ("SIDO", "Sido Muncul"),
    ("KLBF", "Kalbe Farma"),
    ("INDF", "Indofood Sukses"),
    ("GGRM", "Gudang Garam"),
    ("HMSP", "HM Sampoerna"),
    ("EXCL", "XL Axiata"),
];

fn default_universe() -> Vec<Ticker> {
    DEFAULT_UNIVERSE
        .iter()
        .map(|(symbol, name)| Ticker::new(*symbol, *name))
        .collect()
}

// ============================================================================
// Scanner Configuration
// ============================================================================

/// Scan universe and signal gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Tickers to scan, in display order
    #[serde(default = "default_universe")]
    pub universe: Vec<Ticker>,

    /// Minimum composite score (0-100) before a signal is built
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Minimum strength (1-5) for a built signal to be kept
    #[serde(default = "default_min_strength")]
    pub min_strength: u8,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            universe: default_universe(),
            min_score: default_min_score(),
            min_strength: default_min_strength(),
        }
    }
}

fn default_min_score() -> f64 {
    50.0
}

fn default_min_strength() -> u8 {
    2
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// Closed-open numeric interval used for uniform draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range is usable for sampling when both ends are finite and `min < max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// Synthetic market data ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible runs. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Previous close, in Rupiah
    #[serde(default = "default_price_range")]
    pub price_range: NumericRange,

    /// Daily change and open perturbation (%)
    #[serde(default = "default_change_range")]
    pub change_range: NumericRange,

    /// Traded shares
    #[serde(default = "default_volume_range")]
    pub volume_range: NumericRange,

    /// RSI draw, also drives the SMA20/EMA9 perturbation
    #[serde(default = "default_rsi_range")]
    pub rsi_range: NumericRange,

    /// Intraday volatility (%)
    #[serde(default = "default_volatility_range")]
    pub volatility_range: NumericRange,

    /// Overnight gap (%)
    #[serde(default = "default_gap_range")]
    pub gap_range: NumericRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            price_range: default_price_range(),
            change_range: default_change_range(),
            volume_range: default_volume_range(),
            rsi_range: default_rsi_range(),
            volatility_range: default_volatility_range(),
            gap_range: default_gap_range(),
        }
    }
}

fn default_price_range() -> NumericRange {
    NumericRange::new(500.0, 50_000.0)
}

fn default_change_range() -> NumericRange {
    NumericRange::new(-5.0, 5.0)
}

fn default_volume_range() -> NumericRange {
    NumericRange::new(1_000_000.0, 100_000_000.0)
}

fn default_rsi_range() -> NumericRange {
    NumericRange::new(20.0, 80.0)
}

fn default_volatility_range() -> NumericRange {
    NumericRange::new(1.0, 5.0)
}

fn default_gap_range() -> NumericRange {
    NumericRange::new(-2.0, 3.0)
}

// ============================================================================
// Display Configuration
// ============================================================================

/// Terminal rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum rows per signal table
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            display_limit: default_display_limit(),
            color: true,
        }
    }
}

fn default_display_limit() -> usize {
    8
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

// Tables own stdout; keep stderr quiet unless asked.
fn default_log_level() -> String {
    "warn".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Environment override whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredOverride {
    pub var: &'static str,
    pub value: String,
}

impl IgnoredOverride {
    fn new(var: &'static str, value: String) -> Self {
        Self { var, value }
    }
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Universe and signal gates
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Synthetic data generator
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Terminal rendering
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration (explicit path or default location) and apply
    /// environment overrides.
    ///
    /// Overrides that failed to parse are returned so the caller can report
    /// them once logging is up.
    pub fn load_with_env(path: Option<&Path>) -> Result<(Self, Vec<IgnoredOverride>)> {
        let mut config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let ignored = config.apply_env_overrides();
        Ok((config, ignored))
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) -> Vec<IgnoredOverride> {
        self.apply_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Vec<IgnoredOverride>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ignored = Vec::new();

        if let Some(level) = lookup("BSJP_LOG_LEVEL") {
            self.observability.log_level = level;
        }

        if let Some(format) = lookup("BSJP_LOG_FORMAT") {
            self.observability.log_format = format;
        }

        if let Some(seed) = lookup("BSJP_SEED") {
            match seed.parse() {
                Ok(s) => self.generator.seed = Some(s),
                Err(_) => ignored.push(IgnoredOverride::new("BSJP_SEED", seed)),
            }
        }

        if let Some(limit) = lookup("BSJP_DISPLAY_LIMIT") {
            match limit.parse() {
                Ok(l) => self.display.display_limit = l,
                Err(_) => ignored.push(IgnoredOverride::new("BSJP_DISPLAY_LIMIT", limit)),
            }
        }

        ignored
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).with_context(|| {
                    format!("Failed to create config directory {}", dir.display())
                })?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

// ============================================================================
// Tests
// ============================================================================
