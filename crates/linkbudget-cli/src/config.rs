//! TOML scenario files.
//!
//! ```toml
//! version = 1
//!
//! [link]
//! tx_power_dbm = 43
//! frequency_mhz = 450
//! distance_km = 25
//! ```
//!
//! Missing keys take the control defaults. Values pass through the
//! bounded controls unless the caller asks for raw resolution.

use linkbudget_engine::{LinkBudgetInput, Parameter};
use serde::Deserialize;

pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfigInput {
    pub version: u32,
    pub link: LinkConfigInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfigInput {
    pub tx_power_dbm: Option<f64>,
    pub tx_gain_dbi: Option<f64>,
    pub rx_gain_dbi: Option<f64>,
    pub frequency_mhz: Option<f64>,
    pub distance_km: Option<f64>,
    pub system_losses_db: Option<f64>,
    pub sensitivity_dbm: Option<f64>,
}

impl LinkConfigInput {
    /// Values present in the file, in form order.
    pub fn values(&self) -> Vec<(Parameter, f64)> {
        [
            (Parameter::TxPower, self.tx_power_dbm),
            (Parameter::TxGain, self.tx_gain_dbi),
            (Parameter::RxGain, self.rx_gain_dbi),
            (Parameter::Frequency, self.frequency_mhz),
            (Parameter::Distance, self.distance_km),
            (Parameter::SystemLosses, self.system_losses_db),
            (Parameter::Sensitivity, self.sensitivity_dbm),
        ]
        .into_iter()
        .filter_map(|(p, v)| v.map(|v| (p, v)))
        .collect()
    }
}

/// A parameter whose value was clamped or snapped while resolving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub parameter: Parameter,
    pub requested: f64,
    pub stored: f64,
}

/// Apply `values` on top of `input`, through the bounded controls unless
/// `raw` is set. Returns every value the controls had to adjust.
pub fn apply_values(
    input: &mut LinkBudgetInput,
    values: impl IntoIterator<Item = (Parameter, f64)>,
    raw: bool,
) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();
    for (parameter, requested) in values {
        if raw {
            input.set_raw(parameter, requested);
            continue;
        }
        let stored = input.set(parameter, requested);
        if stored != requested {
            adjustments.push(Adjustment {
                parameter,
                requested,
                stored,
            });
        }
    }
    adjustments
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub version: u32,
    pub input: LinkBudgetInput,
    pub adjustments: Vec<Adjustment>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            input: LinkBudgetInput::default(),
            adjustments: Vec::new(),
        }
    }
}

impl ScenarioConfigInput {
    pub fn resolve(self, raw: bool) -> Result<ScenarioConfig, String> {
        let version = if self.version == 0 {
            CONFIG_VERSION
        } else {
            self.version
        };
        if version != CONFIG_VERSION {
            return Err(format!("Unsupported config version {}", version));
        }

        let mut input = LinkBudgetInput::default();
        let adjustments = apply_values(&mut input, self.link.values(), raw);

        Ok(ScenarioConfig {
            version,
            input,
            adjustments,
        })
    }
}

impl ScenarioConfig {
    pub fn from_toml_str(input: &str, raw: bool) -> Result<Self, String> {
        if input.trim().is_empty() {
            return Ok(ScenarioConfig::default());
        }
        let parsed: ScenarioConfigInput =
            toml::from_str(input).map_err(|e| format!("Invalid scenario TOML: {}", e))?;
        parsed.resolve(raw)
    }
}
