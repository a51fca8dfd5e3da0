//! Link budget parameters and their control domains.
//!
//! Each of the seven inputs is named by a [`Parameter`], which carries the
//! label, unit, domain and default of the slider that drives it. The
//! engine itself never checks domains; [`Parameter::constrain`] is the
//! bounded-control behaviour used by the presentation layer.

use serde::{Deserialize, Serialize};

/// Slider step shared by every control (whole units).
pub const CONTROL_STEP: f64 = 1.0;

/// One of the seven user-adjustable link budget inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    TxPower,
    TxGain,
    RxGain,
    Frequency,
    Distance,
    SystemLosses,
    Sensitivity,
}

impl Parameter {
    /// All parameters in form order.
    pub const ALL: [Parameter; 7] = [
        Parameter::TxPower,
        Parameter::TxGain,
        Parameter::RxGain,
        Parameter::Frequency,
        Parameter::Distance,
        Parameter::SystemLosses,
        Parameter::Sensitivity,
    ];

    /// Short key used on the command line and in session commands.
    pub fn key(self) -> &'static str {
        match self {
            Parameter::TxPower => "tx_power",
            Parameter::TxGain => "tx_gain",
            Parameter::RxGain => "rx_gain",
            Parameter::Frequency => "frequency",
            Parameter::Distance => "distance",
            Parameter::SystemLosses => "system_losses",
            Parameter::Sensitivity => "sensitivity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Parameter::TxPower => "Transmit Power",
            Parameter::TxGain => "Transmitter Antenna Gain",
            Parameter::RxGain => "Receiver Antenna Gain",
            Parameter::Frequency => "Frequency",
            Parameter::Distance => "Distance",
            Parameter::SystemLosses => "System Losses",
            Parameter::Sensitivity => "Receiver Sensitivity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Parameter::TxPower | Parameter::Sensitivity => "dBm",
            Parameter::TxGain | Parameter::RxGain => "dBi",
            Parameter::Frequency => "MHz",
            Parameter::Distance => "km",
            Parameter::SystemLosses => "dB",
        }
    }

    /// Inclusive `(min, max)` domain of the control.
    pub fn range(self) -> (f64, f64) {
        match self {
            Parameter::TxPower => (20.0, 60.0),
            Parameter::TxGain | Parameter::RxGain => (0.0, 20.0),
            Parameter::Frequency => (30.0, 5000.0),
            Parameter::Distance => (1.0, 100.0),
            Parameter::SystemLosses => (0.0, 10.0),
            Parameter::Sensitivity => (-120.0, -80.0),
        }
    }

    pub fn default_value(self) -> f64 {
        match self {
            Parameter::TxPower => 40.0,
            Parameter::TxGain => 3.0,
            Parameter::RxGain => 2.0,
            Parameter::Frequency => 100.0,
            Parameter::Distance => 10.0,
            Parameter::SystemLosses => 2.0,
            Parameter::Sensitivity => -100.0,
        }
    }

    pub fn in_domain(self, value: f64) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }

    /// Map an arbitrary value onto what the slider can actually hold:
    /// clamp to the domain, then snap to [`CONTROL_STEP`].
    ///
    /// NaN falls back to the default, since a slider cannot express it.
    pub fn constrain(self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default_value();
        }
        let (min, max) = self.range();
        let snapped = (value.clamp(min, max) / CONTROL_STEP).round() * CONTROL_STEP;
        snapped.clamp(min, max)
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "tx_power" | "transmit_power" => Ok(Parameter::TxPower),
            "tx_gain" => Ok(Parameter::TxGain),
            "rx_gain" => Ok(Parameter::RxGain),
            "frequency" | "freq" => Ok(Parameter::Frequency),
            "distance" => Ok(Parameter::Distance),
            "system_losses" | "losses" => Ok(Parameter::SystemLosses),
            "sensitivity" => Ok(Parameter::Sensitivity),
            other => Err(format!("unknown parameter: {other}")),
        }
    }
}

/// Snapshot of the seven inputs for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkBudgetInput {
    /// Transmitter output power in dBm.
    pub transmit_power_dbm: f64,
    /// Transmit antenna gain in dBi.
    pub tx_gain_dbi: f64,
    /// Receive antenna gain in dBi.
    pub rx_gain_dbi: f64,
    /// Carrier frequency in MHz.
    pub frequency_mhz: f64,
    /// Path length in km.
    pub distance_km: f64,
    /// Cable, connector and other fixed losses in dB.
    pub system_losses_db: f64,
    /// Minimum usable received power in dBm.
    pub sensitivity_dbm: f64,
}

impl Default for LinkBudgetInput {
    fn default() -> Self {
        Self {
            transmit_power_dbm: Parameter::TxPower.default_value(),
            tx_gain_dbi: Parameter::TxGain.default_value(),
            rx_gain_dbi: Parameter::RxGain.default_value(),
            frequency_mhz: Parameter::Frequency.default_value(),
            distance_km: Parameter::Distance.default_value(),
            system_losses_db: Parameter::SystemLosses.default_value(),
            sensitivity_dbm: Parameter::Sensitivity.default_value(),
        }
    }
}

impl LinkBudgetInput {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::TxPower => self.transmit_power_dbm,
            Parameter::TxGain => self.tx_gain_dbi,
            Parameter::RxGain => self.rx_gain_dbi,
            Parameter::Frequency => self.frequency_mhz,
            Parameter::Distance => self.distance_km,
            Parameter::SystemLosses => self.system_losses_db,
            Parameter::Sensitivity => self.sensitivity_dbm,
        }
    }

    fn slot(&mut self, parameter: Parameter) -> &mut f64 {
        match parameter {
            Parameter::TxPower => &mut self.transmit_power_dbm,
            Parameter::TxGain => &mut self.tx_gain_dbi,
            Parameter::RxGain => &mut self.rx_gain_dbi,
            Parameter::Frequency => &mut self.frequency_mhz,
            Parameter::Distance => &mut self.distance_km,
            Parameter::SystemLosses => &mut self.system_losses_db,
            Parameter::Sensitivity => &mut self.sensitivity_dbm,
        }
    }

    /// Store `value` through the bounded control for `parameter`.
    ///
    /// Returns the value actually stored; compare with `value` to detect
    /// clamping or snapping.
    pub fn set(&mut self, parameter: Parameter, value: f64) -> f64 {
        let stored = parameter.constrain(value);
        *self.slot(parameter) = stored;
        stored
    }

    /// Store `value` unchanged, bypassing the control domain.
    pub fn set_raw(&mut self, parameter: Parameter, value: f64) {
        *self.slot(parameter) = value;
    }

    /// Parameters whose current value lies outside the control domain.
    pub fn out_of_domain(&self) -> Vec<Parameter> {
        Parameter::ALL
            .into_iter()
            .filter(|p| !p.in_domain(self.get(*p)))
            .collect()
    }
}
