//! Plain-text rendering of a link budget.
//!
//! Values are shown to one decimal place, wavelength to two. Inputs are
//! printed as given (`40`, not `40.0`). The status line carries its
//! severity tag (`[nominal]`, `[caution]`, `[warning]`, `[critical]`).

use std::fmt::Write;

use crate::engine::{LinkBudgetResult, dbm_to_watts};
use crate::params::{LinkBudgetInput, Parameter};

pub const FREE_SPACE_NOTE: &str = "Note: This calculator uses the Friis transmission formula for \
free-space path loss. Actual tactical deployments may experience additional losses due to \
terrain, foliage, buildings, atmospheric conditions, jamming, or interference.";

/// `"40 dBm (10.0 Watts)"`.
pub fn format_transmit_power(dbm: f64) -> String {
    format!("{dbm} dBm ({:.1} Watts)", dbm_to_watts(dbm))
}

/// One line per control: label, current value and unit.
pub fn render_controls(input: &LinkBudgetInput) -> String {
    let mut out = String::with_capacity(512);
    for p in Parameter::ALL {
        let value = input.get(p);
        let shown = match p {
            Parameter::TxPower => format_transmit_power(value),
            _ => format!("{value} {}", p.unit()),
        };
        writeln!(out, "{:<28} {shown}", format!("{} ({})", p.label(), p.unit())).unwrap();
    }
    out
}

/// The four formulas with the current values substituted.
pub fn render_formulas(input: &LinkBudgetInput, result: &LinkBudgetResult) -> String {
    let mut out = String::with_capacity(512);
    writeln!(out, "Formulas").unwrap();
    writeln!(
        out,
        "  1. Wavelength λ: λ = 300 / f = 300 / {} MHz = {:.2} m",
        input.frequency_mhz, result.wavelength_m
    )
    .unwrap();
    writeln!(
        out,
        "  2. Free-space Path Loss PL: PL(dB) = 20 log₁₀((4π·R) / λ) = 20 log₁₀((4π·{} m) / {:.2} m) = {:.1} dB",
        input.distance_km * 1000.0,
        result.wavelength_m,
        result.path_loss_db
    )
    .unwrap();
    writeln!(
        out,
        "  3. Received Power Pr: Pr(dBm) = Pt + Gt + Gr − PL − L = {} + {} + {} − {:.1} − {} = {:.1} dBm",
        input.transmit_power_dbm,
        input.tx_gain_dbi,
        input.rx_gain_dbi,
        result.path_loss_db,
        input.system_losses_db,
        result.received_power_dbm
    )
    .unwrap();
    writeln!(
        out,
        "  4. Link Margin: Margin = Pr − Sensitivity = {:.1} − ({}) = {:.1} dB",
        result.received_power_dbm, input.sensitivity_dbm, result.link_margin_db
    )
    .unwrap();
    out
}

/// Results panel: path loss, received power, margin and status wording.
pub fn render_results(result: &LinkBudgetResult) -> String {
    let mut out = String::with_capacity(256);
    writeln!(out, "Link Budget Results").unwrap();
    writeln!(out, "  Path Loss:      {:.1} dB", result.path_loss_db).unwrap();
    writeln!(out, "  Received Power: {:.1} dBm", result.received_power_dbm).unwrap();
    writeln!(out, "  Link Margin:    {:.1} dB", result.link_margin_db).unwrap();
    writeln!(
        out,
        "  Link Status:    {} [{}]",
        result.status.wording(),
        result.status.severity()
    )
    .unwrap();
    out
}

/// Full report: controls, formulas, results and the free-space note.
pub fn render_report(input: &LinkBudgetInput, result: &LinkBudgetResult) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(&render_controls(input));
    out.push('\n');
    out.push_str(&render_formulas(input, result));
    out.push('\n');
    out.push_str(&render_results(result));
    out.push('\n');
    writeln!(out, "{FREE_SPACE_NOTE}").unwrap();
    out
}
