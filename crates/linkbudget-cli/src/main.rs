//! Link Budget Calculator
//!
//! Command-line front end for the free-space link budget engine.
//!
//! - `eval` computes one budget from defaults, a TOML scenario and flags
//! - `interactive` keeps the controls in a session and recomputes on
//!   every change

mod config;
mod output;
mod session;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use linkbudget_engine::{LinkBudgetInput, LinkBudgetResult, Parameter, evaluate};
use tracing_subscriber::EnvFilter;

use config::{Adjustment, ScenarioConfig, apply_values};
use output::OutputFormat;

/// Free-space (Friis) RF link budget calculator.
#[derive(Parser, Debug)]
#[command(name = "linkbudget", about = "Free-space RF link budget calculator")]
struct Cli {
    /// Log filter, overrides RUST_LOG (e.g. "debug").
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one link budget and print the report.
    Eval(EvalArgs),
    /// Adjust controls line by line and watch the budget update.
    Interactive {
        /// TOML scenario file with initial values.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct EvalArgs {
    /// TOML scenario file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transmit power in dBm (20..=60).
    #[arg(long, allow_negative_numbers = true)]
    tx_power: Option<f64>,

    /// Transmitter antenna gain in dBi (0..=20).
    #[arg(long, allow_negative_numbers = true)]
    tx_gain: Option<f64>,

    /// Receiver antenna gain in dBi (0..=20).
    #[arg(long, allow_negative_numbers = true)]
    rx_gain: Option<f64>,

    /// Frequency in MHz (30..=5000).
    #[arg(long, allow_negative_numbers = true)]
    frequency: Option<f64>,

    /// Distance in km (1..=100).
    #[arg(long, allow_negative_numbers = true)]
    distance: Option<f64>,

    /// System losses in dB (0..=10).
    #[arg(long, allow_negative_numbers = true)]
    system_losses: Option<f64>,

    /// Receiver sensitivity in dBm (-120..=-80).
    #[arg(long, allow_negative_numbers = true)]
    sensitivity: Option<f64>,

    /// Output format: text or json.
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Pass values to the engine unchanged instead of through the
    /// bounded controls.
    #[arg(long, default_value_t = false)]
    raw: bool,
}

impl EvalArgs {
    fn values(&self) -> Vec<(Parameter, f64)> {
        [
            (Parameter::TxPower, self.tx_power),
            (Parameter::TxGain, self.tx_gain),
            (Parameter::RxGain, self.rx_gain),
            (Parameter::Frequency, self.frequency),
            (Parameter::Distance, self.distance),
            (Parameter::SystemLosses, self.system_losses),
            (Parameter::Sensitivity, self.sensitivity),
        ]
        .into_iter()
        .filter_map(|(p, v)| v.map(|v| (p, v)))
        .collect()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Eval(args) => run_eval(args),
        Command::Interactive { config } => run_interactive(config.as_deref()),
    }
}

fn load_scenario(path: Option<&Path>, raw: bool) -> anyhow::Result<ScenarioConfig> {
    let Some(path) = path else {
        return Ok(ScenarioConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario file {}", path.display()))?;
    let scenario = ScenarioConfig::from_toml_str(&text, raw)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("failed to load scenario file {}", path.display()))?;
    tracing::info!(path = %path.display(), version = scenario.version, "scenario loaded");
    Ok(scenario)
}

fn log_adjustments(adjustments: &[Adjustment]) {
    for a in adjustments {
        let (min, max) = a.parameter.range();
        tracing::warn!(
            parameter = %a.parameter,
            requested = a.requested,
            stored = a.stored,
            min,
            max,
            "value adjusted to fit control"
        );
    }
}

/// Layer `args` over the scenario: defaults, then the file, then flags.
fn resolve_input(
    scenario: &ScenarioConfig,
    args: &EvalArgs,
) -> (LinkBudgetInput, Vec<Adjustment>) {
    let mut input = scenario.input;
    let adjustments = apply_values(&mut input, args.values(), args.raw);
    (input, adjustments)
}

fn evaluate_args(args: &EvalArgs) -> anyhow::Result<(LinkBudgetInput, LinkBudgetResult)> {
    let scenario = load_scenario(args.config.as_deref(), args.raw)?;
    log_adjustments(&scenario.adjustments);

    let (input, adjustments) = resolve_input(&scenario, args);
    log_adjustments(&adjustments);

    if args.raw {
        for p in input.out_of_domain() {
            tracing::warn!(parameter = %p, value = input.get(p), "value outside control domain");
        }
    }

    let result = evaluate(&input).context("link budget evaluation failed")?;
    tracing::debug!(
        path_loss_db = result.path_loss_db,
        link_margin_db = result.link_margin_db,
        status = %result.status,
        "link budget evaluated"
    );
    Ok((input, result))
}

fn run_eval(args: EvalArgs) -> anyhow::Result<()> {
    let (input, result) = evaluate_args(&args)?;
    let rendered = output::render(args.format, &input, &result).context("failed to render report")?;
    print!("{rendered}");
    Ok(())
}

fn run_interactive(config: Option<&Path>) -> anyhow::Result<()> {
    let scenario = load_scenario(config, false)?;
    log_adjustments(&scenario.adjustments);

    let mut session = session::Session::new(scenario.input);
    tracing::info!("interactive session started");
    session
        .run(io::stdin().lock(), io::stdout().lock())
        .context("interactive session failed")?;

    let final_input: &LinkBudgetInput = session.input();
    tracing::info!(?final_input, "interactive session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkbudget_engine::{LinkBudgetError, LinkStatus};

    fn eval_args(argv: &[&str]) -> EvalArgs {
        let cli = Cli::try_parse_from(
            ["linkbudget", "eval"]
                .into_iter()
                .chain(argv.iter().copied()),
        )
        .unwrap();
        match cli.command {
            Command::Eval(args) => args,
            other => panic!("expected eval, got {other:?}"),
        }
    }

    fn scenario(toml: &str) -> ScenarioConfig {
        ScenarioConfig::from_toml_str(toml, false).unwrap()
    }

    #[test]
    fn flags_override_scenario_values() {
        let file = scenario("[link]\nfrequency_mhz = 450\ndistance_km = 25\n");
        let args = eval_args(&["--distance", "40", "--sensitivity", "-110"]);
        let (input, adjustments) = resolve_input(&file, &args);
        assert_eq!(input.distance_km, 40.0);
        assert_eq!(input.frequency_mhz, 450.0);
        assert_eq!(input.sensitivity_dbm, -110.0);
        assert_eq!(input.transmit_power_dbm, 40.0);
        assert!(adjustments.is_empty());
    }

    #[test]
    fn flags_pass_through_bounded_controls() {
        let args = eval_args(&["--frequency", "9000"]);
        let (input, adjustments) = resolve_input(&ScenarioConfig::default(), &args);
        assert_eq!(input.frequency_mhz, 5000.0);
        assert_eq!(adjustments.len(), 1);
        assert_eq!(adjustments[0].parameter, Parameter::Frequency);
        assert_eq!(adjustments[0].requested, 9000.0);
    }

    #[test]
    fn scenario_file_then_flags_end_to_end() {
        let path = std::env::temp_dir().join(format!("linkbudget-{}.toml", std::process::id()));
        std::fs::write(&path, "[link]\nfrequency_mhz = 5000\ndistance_km = 100\n").unwrap();
        let config = path.to_string_lossy().into_owned();

        let (input, result) = evaluate_args(&eval_args(&["--config", &config])).unwrap();
        assert_eq!(input.frequency_mhz, 5000.0);
        assert_eq!(result.status, LinkStatus::Failed);

        let (input, result) =
            evaluate_args(&eval_args(&["--config", &config, "--distance", "1"])).unwrap();
        assert_eq!(input.distance_km, 1.0);
        assert_eq!(result.status, LinkStatus::Excellent);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn raw_zero_distance_fails_evaluation() {
        let err = evaluate_args(&eval_args(&["--raw", "--distance", "0"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LinkBudgetError>(),
            Some(LinkBudgetError::InvalidInput {
                parameter: Parameter::Distance,
                ..
            })
        ));
        assert!(run_eval(eval_args(&["--raw", "--distance", "0"])).is_err());
    }

    #[test]
    fn zero_distance_without_raw_is_clamped() {
        let (input, _) = evaluate_args(&eval_args(&["--distance", "0"])).unwrap();
        assert_eq!(input.distance_km, 1.0);
    }

    #[test]
    fn missing_scenario_file_is_an_error() {
        let err = evaluate_args(&eval_args(&["--config", "/nonexistent/linkbudget.toml"]))
            .unwrap_err();
        assert!(err.to_string().contains("failed to read scenario file"));
    }
}
