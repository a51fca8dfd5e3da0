//! Output formats for one-shot evaluation.

use linkbudget_engine::report::render_report;
use linkbudget_engine::{LinkBudgetInput, LinkBudgetResult, Severity, dbm_to_watts};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// JSON document for `--format json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub input: &'a LinkBudgetInput,
    pub result: &'a LinkBudgetResult,
    pub severity: Severity,
    pub transmit_power_watts: f64,
}

pub fn render(
    format: OutputFormat,
    input: &LinkBudgetInput,
    result: &LinkBudgetResult,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_report(input, result)),
        OutputFormat::Json => {
            let report = Report {
                input,
                result,
                severity: result.status.severity(),
                transmit_power_watts: dbm_to_watts(input.transmit_power_dbm),
            };
            serde_json::to_string_pretty(&report).map(|mut s| {
                s.push('\n');
                s
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkbudget_engine::evaluate;

    #[test]
    fn parse_formats() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_report_shape() {
        let input = LinkBudgetInput::default();
        let result = evaluate(&input).unwrap();
        let text = render(OutputFormat::Json, &input, &result).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["input"]["distance_km"], 10.0);
        assert_eq!(v["result"]["status"], "excellent");
        assert_eq!(v["severity"], "nominal");
        assert!((v["result"]["wavelength_m"].as_f64().unwrap() - 3.0).abs() < 1e-12);
        assert!((v["transmit_power_watts"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn json_report_flags_failed_link_as_critical() {
        let input = LinkBudgetInput {
            frequency_mhz: 5000.0,
            distance_km: 100.0,
            ..LinkBudgetInput::default()
        };
        let result = evaluate(&input).unwrap();
        let text = render(OutputFormat::Json, &input, &result).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["result"]["status"], "failed");
        assert_eq!(v["severity"], "critical");
    }

    #[test]
    fn text_report_is_the_full_report() {
        let input = LinkBudgetInput::default();
        let result = evaluate(&input).unwrap();
        let text = render(OutputFormat::Text, &input, &result).unwrap();
        assert_eq!(text, render_report(&input, &result));
    }
}
