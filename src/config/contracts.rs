use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// How a funded lesson is settled from attendance data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// 90% / 10% attendance bands with a dispute fallback
    #[default]
    ThresholdBands,
    /// Single 95% teacher threshold; a student override always pays out
    StudentOverride,
}

impl ResolutionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPolicy::ThresholdBands => "threshold_bands",
            ResolutionPolicy::StudentOverride => "student_override",
        }
    }
}

impl FromStr for ResolutionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "threshold_bands" | "bands" => Ok(ResolutionPolicy::ThresholdBands),
            "student_override" | "override" => Ok(ResolutionPolicy::StudentOverride),
            other => Err(ConfigError::InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where transaction fees go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeeMode {
    /// Fees leave the wallet set and are only tallied in `burned_fees`
    #[default]
    Burn,
    /// Fees are credited to the platform wallet
    Collect,
}

impl FeeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeMode::Burn => "burn",
            FeeMode::Collect => "collect",
        }
    }
}

impl FromStr for FeeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "burn" => Ok(FeeMode::Burn),
            "collect" => Ok(FeeMode::Collect),
            other => Err(ConfigError::InvalidFeeMode(other.to_string())),
        }
    }
}

impl fmt::Display for FeeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Economic parameters of the escrow contract
#[derive(Clone, Debug, PartialEq)]
pub struct ContractSettings {
    pub starting_student_balance: f64,
    pub default_lesson_price: f64,
    pub platform_fee_percent: f64,
    pub tx_fee_percent: f64,
    pub required_duration_minutes: u32,
    pub resolution_policy: ResolutionPolicy,
    pub fee_mode: FeeMode,
}

impl Default for ContractSettings {
    fn default() -> Self {
        Self {
            starting_student_balance: 100.0,
            default_lesson_price: 30.0,
            platform_fee_percent: 0.02,
            tx_fee_percent: 0.001,
            required_duration_minutes: 60,
            resolution_policy: ResolutionPolicy::default(),
            fee_mode: FeeMode::default(),
        }
    }
}

impl ContractSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Ok(policy) = env::var("RESOLUTION_POLICY") {
            settings.resolution_policy = policy.parse()?;
        }
        if let Ok(mode) = env::var("FEE_MODE") {
            settings.fee_mode = mode.parse()?;
        }
        if let Ok(minutes) = env::var("REQUIRED_DURATION_MINUTES") {
            settings.required_duration_minutes = minutes
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("REQUIRED_DURATION_MINUTES", minutes))?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_duration_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "required duration must be at least one minute".to_string(),
            ));
        }
        for (name, pct) in [
            ("platform fee", self.platform_fee_percent),
            ("transaction fee", self.tx_fee_percent),
        ] {
            if !(0.0..1.0).contains(&pct) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be in [0, 1), got {}",
                    name, pct
                )));
            }
        }
        Ok(())
    }
}
