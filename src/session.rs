//! Interactive, line-oriented front end over a [`CalculatorForm`].

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::form::CalculatorForm;
use crate::report;
use crate::validation::{self, PositionInput, ValidationError};

const HELP: &str = "\
Commands:
  pair [PAIR]              show or select the pair
  close [PRICE]            show or set the close price (without decimal, e.g. 90800)
  add DIR LOT OPEN         add a position, e.g. `add buy 1.5 90400` or `add buy:1.5:90400`
  remove N                 remove position N (as numbered by `list`)
  list                     show open positions
  reset                    clear pair, close and positions
  calc                     calculate the total value
  breakdown                show the value of each position
  pairs                    show tradeable pairs
  help                     show this help
  quit                     leave the session
";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pair(Option<String>),
    Close(Option<String>),
    Add(PositionInput),
    Remove(String),
    List,
    Reset,
    Calc,
    Breakdown,
    Pairs,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err("Empty command.".to_string());
        };
        let rest: Vec<&str> = words.collect();
        let arg = || rest.first().map(|s| s.to_string());

        match name.to_lowercase().as_str() {
            "pair" => Ok(Command::Pair(arg())),
            "close" => Ok(Command::Close(arg())),
            "add" => Ok(Command::Add(match rest.as_slice() {
                [compact] => compact.parse().unwrap_or_default(),
                _ => {
                    let part = |i: usize| rest.get(i).map(|s| s.to_string());
                    PositionInput {
                        direction: part(0),
                        lot: part(1),
                        open: part(2),
                    }
                }
            })),
            "remove" | "rm" => arg()
                .map(Command::Remove)
                .ok_or_else(|| "Usage: remove N".to_string()),
            "list" | "ls" => Ok(Command::List),
            "reset" => Ok(Command::Reset),
            "calc" | "calculate" => Ok(Command::Calc),
            "breakdown" => Ok(Command::Breakdown),
            "pairs" => Ok(Command::Pairs),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!(
                "Unknown command `{}`. Type `help` for a list of commands.",
                other
            )),
        }
    }
}

/// Whether the session should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session state.
pub struct Session {
    form: CalculatorForm,
}

impl Session {
    pub fn new(form: CalculatorForm) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &CalculatorForm {
        &self.form
    }

    /// Read commands until end of input or `quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        info!("Session started");
        writeln!(out, "Type `help` for a list of commands.")?;
        prompt(&mut out)?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if line.trim().is_empty() {
                prompt(&mut out)?;
                continue;
            }

            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command, &mut out)?,
                Err(message) => {
                    writeln!(out, "{}", message)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
            prompt(&mut out)?;
        }

        info!(positions = self.form.positions().len(), "Session ended");
        Ok(())
    }

    /// Apply one command, writing its feedback to `out`.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "Executing command");

        match command {
            Command::Pair(None) => writeln!(out, "Pair: {}", self.form.pair())?,
            Command::Pair(Some(text)) => match validation::parse_pair(Some(text.as_str())) {
                Ok(pair) => {
                    self.form.set_pair(pair);
                    writeln!(out, "Pair: {} (spread {})", pair, pair.spread_factor())?;
                }
                Err(kind) => writeln!(out, "pair: {}", kind)?,
            },

            Command::Close(None) => {
                let close = self.form.close();
                writeln!(out, "Close at: {}", if close.is_empty() { "-" } else { close })?;
            }
            Command::Close(Some(text)) => {
                self.form.set_close(text);
                match validation::validate_close(Some(self.form.close())) {
                    Ok(close) => writeln!(out, "Close at: {}", close)?,
                    Err(err) => write_issues(out, &err)?,
                }
            }

            Command::Add(input) => match self.form.add_position(&input) {
                Ok(position) => writeln!(
                    out,
                    "Added {} {} @ {}",
                    position.direction(),
                    position.lot(),
                    position.open()
                )?,
                Err(err) => write_issues(out, &err)?,
            },

            Command::Remove(text) => {
                let removed = text
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|index| self.form.remove_position(index));
                match removed {
                    Some(position) => writeln!(
                        out,
                        "Removed {} {} @ {}",
                        position.direction(),
                        position.lot(),
                        position.open()
                    )?,
                    None => writeln!(out, "No position `{}`.", text)?,
                }
            }

            Command::List => write!(out, "{}", report::positions_table(self.form.positions()))?,

            Command::Reset => {
                self.form.reset();
                writeln!(out, "Form reset. Pair: {}", self.form.pair())?;
            }

            Command::Calc => {
                if !self.form.can_calculate() {
                    writeln!(out, "No open positions.")?;
                } else {
                    match self.form.calculate() {
                        Ok(_) => writeln!(
                            out,
                            "[{}] {}",
                            chrono::Local::now().format("%H:%M:%S"),
                            self.form.summary()
                        )?,
                        Err(err) => write_issues(out, &err)?,
                    }
                }
            }

            Command::Breakdown => match self.form.valuation() {
                Ok(valuation) => write!(out, "{}", report::valuation_table(&valuation, self.form.precision()))?,
                Err(err) => write_issues(out, &err)?,
            },

            Command::Pairs => write!(out, "{}", report::pairs_table())?,
            Command::Help => write!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn write_issues<W: Write>(out: &mut W, err: &ValidationError) -> std::io::Result<()> {
    for issue in err.issues() {
        writeln!(out, "{}", issue)?;
    }
    Ok(())
}
