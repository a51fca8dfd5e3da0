//! Interactive line-oriented session.
//!
//! Holds the current control values and re-evaluates the link budget after
//! every accepted change, one command at a time.

use std::io::{self, BufRead, Write};

use linkbudget_engine::report::{render_controls, render_formulas, render_report, render_results};
use linkbudget_engine::{LinkBudgetInput, Parameter, evaluate};

pub const HELP: &str = "\
Commands:
  set <param> <value>   adjust a control (also: <param>=<value>)
  reset [param]         restore one control, or all, to the starting values
  show                  print the full report
  formulas              print the formula breakdown
  params                list parameter keys and domains
  help                  print this help
  quit | exit           leave the session";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Set(Parameter, f64),
    Reset(Option<Parameter>),
    Show,
    Formulas,
    Params,
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if let Some((key, value)) = line.split_once('=') {
            return parse_set(key, value);
        }

        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or_default().to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();
        match (head.as_str(), rest.as_slice()) {
            ("set", [key, value]) => parse_set(key, value),
            ("set", _) => Err("usage: set <param> <value>".into()),
            ("reset", []) => Ok(Command::Reset(None)),
            ("reset", [key]) => Ok(Command::Reset(Some(key.parse()?))),
            ("show", []) => Ok(Command::Show),
            ("formulas", []) => Ok(Command::Formulas),
            ("params", []) => Ok(Command::Params),
            ("help" | "?", []) => Ok(Command::Help),
            ("quit" | "exit", []) => Ok(Command::Quit),
            ("", _) => Err("empty command".into()),
            (other, _) => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

fn parse_set(key: &str, value: &str) -> Result<Command, String> {
    let parameter: Parameter = key.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number for {parameter}: {}", value.trim()))?;
    Ok(Command::Set(parameter, value))
}

pub enum Step {
    Continue(String),
    Quit,
}

pub struct Session {
    input: LinkBudgetInput,
    /// Values the session started from; `reset` returns here.
    baseline: LinkBudgetInput,
}

impl Session {
    pub fn new(input: LinkBudgetInput) -> Self {
        Self {
            input,
            baseline: input,
        }
    }

    pub fn input(&self) -> &LinkBudgetInput {
        &self.input
    }

    /// Current results panel, or the evaluation error.
    fn results(&self) -> String {
        match evaluate(&self.input) {
            Ok(result) => render_results(&result),
            Err(e) => format!("error: {e}\n"),
        }
    }

    pub fn execute(&mut self, command: Command) -> Step {
        let output = match command {
            Command::Set(parameter, requested) => {
                let stored = self.input.set(parameter, requested);
                tracing::debug!(%parameter, requested, stored, "control changed");
                let mut out = String::new();
                if stored != requested {
                    let (min, max) = parameter.range();
                    out.push_str(&format!(
                        "{parameter} adjusted to {stored} {} (domain {min}..={max}, step 1)\n",
                        parameter.unit()
                    ));
                }
                out.push_str(&self.results());
                out
            }
            Command::Reset(Some(parameter)) => {
                self.input.set_raw(parameter, self.baseline.get(parameter));
                self.results()
            }
            Command::Reset(None) => {
                self.input = self.baseline;
                self.results()
            }
            Command::Show => match evaluate(&self.input) {
                Ok(result) => render_report(&self.input, &result),
                Err(e) => format!("{}error: {e}\n", render_controls(&self.input)),
            },
            Command::Formulas => match evaluate(&self.input) {
                Ok(result) => render_formulas(&self.input, &result),
                Err(e) => format!("error: {e}\n"),
            },
            Command::Params => parameter_table(),
            Command::Help => format!("{HELP}\n"),
            Command::Quit => return Step::Quit,
        };
        Step::Continue(output)
    }

    /// Drive the session from `reader` until EOF or `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> io::Result<()> {
        writer.write_all(self.results().as_bytes())?;
        write!(writer, "> ")?;
        writer.flush()?;

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                write!(writer, "> ")?;
                writer.flush()?;
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => match self.execute(command) {
                    Step::Continue(output) => writer.write_all(output.as_bytes())?,
                    Step::Quit => break,
                },
                Err(e) => {
                    tracing::debug!(line = %line, error = %e, "rejected session command");
                    writeln!(writer, "error: {e}")?;
                }
            }
            write!(writer, "> ")?;
            writer.flush()?;
        }
        writer.flush()
    }
}

fn parameter_table() -> String {
    let mut out = String::new();
    for p in Parameter::ALL {
        let (min, max) = p.range();
        out.push_str(&format!(
            "  {:<14} {:<26} {min}..={max} {} (default {})\n",
            p.key(),
            p.label(),
            p.unit(),
            p.default_value()
        ));
    }
    out
}
