use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    currency::{CurrencyCode, FormatOptions, LocaleConfig},
    errors::{CashflowError, Result},
    ledger::{BalanceProjector, EmptyHistory, PeriodCalculator},
    utils::paths::{app_data_dir, config_file_in, ensure_dir, store_file_in},
};

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 3 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Fixed offset used to decide what "today" is.
    pub utc_offset_minutes: i32,
    pub empty_history: EmptyHistory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            empty_history: EmptyHistory::default(),
            fraction_digits: None,
            store_path: None,
        }
    }
}

impl Config {
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            fraction_digits: self.fraction_digits,
            ..FormatOptions::default()
        }
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                CashflowError::ConfigError(format!(
                    "utc_offset_minutes {} is out of range",
                    self.utc_offset_minutes
                ))
            })
    }

    pub fn period_calculator(&self) -> PeriodCalculator {
        PeriodCalculator::new(self.locale_config())
    }

    pub fn projector(&self) -> BalanceProjector {
        BalanceProjector::new(self.locale_config(), self.empty_history)
    }
}

/// Loads and saves [`Config`] as JSON under the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        let path = config_file_in(&base);
        Ok(Self { base, path })
    }

    /// Uses an explicit config file; the store defaults to its directory.
    pub fn with_config_file(path: PathBuf) -> Self {
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { base, path }
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| CashflowError::ConfigError(format!("{}: {err}", self.path.display())))?;
        config.utc_offset()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Transaction file for `config`: its explicit path or the default under the base dir.
    pub fn store_path(&self, config: &Config) -> PathBuf {
        config
            .store_path
            .clone()
            .unwrap_or_else(|| store_file_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
