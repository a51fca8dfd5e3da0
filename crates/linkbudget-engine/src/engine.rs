//! # Free-Space Link Budget
//!
//! Closed-form Friis link budget:
//!
//! $$\lambda = \frac{300}{f_{\text{MHz}}}$$
//! $$PL = 20 \log_{10}\left(\frac{4 \pi d}{\lambda}\right)$$
//! $$P_r = P_t + G_t + G_r - PL - L$$
//! $$M = P_r - S$$
//!
//! Only geometric spreading is modelled. Terrain, foliage, atmosphere and
//! interference are out of scope.

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::LinkBudgetError;
use crate::params::{LinkBudgetInput, Parameter};
use crate::status::LinkStatus;

/// Speed of light in m/s divided by 1e6, so that `C / f_MHz` is metres.
pub const SPEED_OF_LIGHT_M_PER_US: f64 = 300.0;

/// Derived quantities for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkBudgetResult {
    pub wavelength_m: f64,
    pub path_loss_db: f64,
    pub received_power_dbm: f64,
    pub link_margin_db: f64,
    pub status: LinkStatus,
}

/// Evaluate the link budget for `input`.
///
/// Domains are not checked here; that is the job of the bounded controls
/// in [`Parameter::constrain`]. Frequency and distance must still be
/// positive and finite so the logarithm is defined.
pub fn evaluate(input: &LinkBudgetInput) -> Result<LinkBudgetResult, LinkBudgetError> {
    require_positive(Parameter::Frequency, input.frequency_mhz)?;
    require_positive(Parameter::Distance, input.distance_km)?;

    let wavelength_m = wavelength_m(input.frequency_mhz);
    let path_loss_db = free_space_path_loss_db(input.distance_km, wavelength_m);
    let received_power_dbm = input.transmit_power_dbm + input.tx_gain_dbi + input.rx_gain_dbi
        - path_loss_db
        - input.system_losses_db;
    let link_margin_db = received_power_dbm - input.sensitivity_dbm;

    Ok(LinkBudgetResult {
        wavelength_m,
        path_loss_db,
        received_power_dbm,
        link_margin_db,
        status: LinkStatus::from_margin(link_margin_db),
    })
}

fn require_positive(parameter: Parameter, value: f64) -> Result<(), LinkBudgetError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LinkBudgetError::InvalidInput { parameter, value })
    }
}

/// Wavelength in metres for a frequency in MHz.
pub fn wavelength_m(frequency_mhz: f64) -> f64 {
    SPEED_OF_LIGHT_M_PER_US / frequency_mhz
}

/// Free-space path loss in dB over `distance_km` at `wavelength_m`.
pub fn free_space_path_loss_db(distance_km: f64, wavelength_m: f64) -> f64 {
    20.0 * ((4.0 * PI * distance_km * 1000.0) / wavelength_m).log10()
}

/// Convert a power level in dBm to watts. Display only.
pub fn dbm_to_watts(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> LinkBudgetInput {
        LinkBudgetInput::default()
    }

    #[test]
    fn reference_scenario() {
        let r = evaluate(&input()).unwrap();
        assert!((r.wavelength_m - 3.0).abs() < 1e-12);
        // 20*log10(4*pi*10000/3) = 92.4418...
        assert!((r.path_loss_db - 92.4418).abs() < 1e-3, "{}", r.path_loss_db);
        assert!((r.received_power_dbm - (-49.4418)).abs() < 1e-3);
        assert!((r.link_margin_db - 50.5582).abs() < 1e-3);
        assert_eq!(r.status, LinkStatus::Excellent);
    }

    #[test]
    fn matches_textbook_fspl_constant() {
        // FSPL(dB) = 20 log10(d_km) + 20 log10(f_MHz) + 32.44 for c = 3e8.
        for (f, d) in [(100.0, 10.0), (2400.0, 1.0), (30.0, 100.0), (5000.0, 37.0)] {
            let pl = free_space_path_loss_db(d, wavelength_m(f));
            let textbook = 20.0 * f64::log10(d) + 20.0 * f64::log10(f) + 32.4418;
            assert!((pl - textbook).abs() < 1e-3, "f={f} d={d}: {pl} vs {textbook}");
        }
    }

    #[test]
    fn worst_case_corner_fails() {
        let mut i = input();
        i.frequency_mhz = 5000.0;
        i.distance_km = 100.0;
        let r = evaluate(&i).unwrap();
        assert!(r.path_loss_db > 146.0);
        assert!(r.link_margin_db < 0.0);
        assert_eq!(r.status, LinkStatus::Failed);
    }

    #[test]
    fn received_power_is_sum_of_terms() {
        let i = LinkBudgetInput {
            transmit_power_dbm: 30.0,
            tx_gain_dbi: 10.0,
            rx_gain_dbi: 5.0,
            frequency_mhz: 900.0,
            distance_km: 5.0,
            system_losses_db: 4.0,
            sensitivity_dbm: -110.0,
        };
        let r = evaluate(&i).unwrap();
        let expected = 30.0 + 10.0 + 5.0 - r.path_loss_db - 4.0;
        assert_eq!(r.received_power_dbm, expected);
        assert_eq!(r.link_margin_db, expected + 110.0);
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let mut i = input();
        i.frequency_mhz = 0.0;
        assert_eq!(
            evaluate(&i),
            Err(LinkBudgetError::InvalidInput {
                parameter: Parameter::Frequency,
                value: 0.0
            })
        );
    }

    #[test]
    fn zero_distance_is_rejected() {
        let mut i = input();
        i.distance_km = 0.0;
        assert!(matches!(
            evaluate(&i),
            Err(LinkBudgetError::InvalidInput {
                parameter: Parameter::Distance,
                ..
            })
        ));
    }

    #[test]
    fn negative_and_non_finite_are_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let mut i = input();
            i.distance_km = bad;
            assert!(evaluate(&i).is_err(), "distance {bad} accepted");
            let mut i = input();
            i.frequency_mhz = bad;
            assert!(evaluate(&i).is_err(), "frequency {bad} accepted");
        }
    }

    #[test]
    fn out_of_domain_values_still_evaluate() {
        let mut i = input();
        i.frequency_mhz = 10_000.0;
        i.transmit_power_dbm = 80.0;
        assert!(evaluate(&i).is_ok());
    }

    #[test]
    fn dbm_to_watts_reference_points() {
        assert!((dbm_to_watts(40.0) - 10.0).abs() < 1e-9);
        assert!((dbm_to_watts(30.0) - 1.0).abs() < 1e-9);
        assert!((dbm_to_watts(20.0) - 0.1).abs() < 1e-12);
        assert!((dbm_to_watts(60.0) - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn error_message_names_parameter() {
        let err = LinkBudgetError::InvalidInput {
            parameter: Parameter::Distance,
            value: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid input: distance must be a positive finite value (got -2)"
        );
    }
}
