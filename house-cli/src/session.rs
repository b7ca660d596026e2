//! Line-oriented wizard session.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use house_core::input::parse_amount;
use house_core::WizardView;
use house_core::models::Field;
use house_core::wizard::{AgentChannel, AgentContact};
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use crate::app::App;
use crate::terminal::TerminalView;

pub const HELP: &str = "\
Commands:
  <field> <value>      choose a chip, e.g. `salary 300000-600000`
  next | back          move between steps
  budget <amount>      set the target price (commas and ₦ allowed)
  down <percent>       set the down payment percentage
  beds <count>         set the number of bedrooms
  show                 print the current step again
  summary              print the assessment summary
  save                 save progress on this device
  agent <whatsapp|email> name; email; phone; notes
                       print a link that sends your assessment to an agent
  finish | quit        leave the wizard";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type `help`)")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{value}' is not a valid {argument}")]
    InvalidValue { argument: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    Select { field: Field, value: String },
    Next,
    Back,
    Budget(i64),
    Down(u8),
    Bedrooms(u8),
    Show,
    Summary,
    Save,
    Agent {
        channel: AgentChannel,
        contact: AgentContact,
    },
    Help,
    Finish,
    Quit,
}

impl WizardCommand {
    /// Parses one input line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "next" | "n" => Self::Next,
            "back" | "b" => Self::Back,
            "show" => Self::Show,
            "summary" => Self::Summary,
            "save" => Self::Save,
            "help" | "?" => Self::Help,
            "finish" => Self::Finish,
            "quit" | "exit" | "q" => Self::Quit,
            "budget" => {
                let raw = required(rest, "budget", "an amount")?;
                let amount = parse_amount(raw)
                    .ok()
                    .and_then(|d| d.round().to_i64())
                    .ok_or_else(|| invalid("amount", raw))?;
                Self::Budget(amount)
            }
            "down" => {
                let raw = required(rest, "down", "a percentage")?;
                let pct = raw
                    .trim_end_matches('%')
                    .parse::<u8>()
                    .ok()
                    .filter(|p| *p <= 100)
                    .ok_or_else(|| invalid("percentage", raw))?;
                Self::Down(pct)
            }
            "beds" | "bedrooms" => {
                let raw = required(rest, "beds", "a count")?;
                Self::Bedrooms(raw.parse().map_err(|_| invalid("bedroom count", raw))?)
            }
            "agent" => {
                let raw = required(rest, "agent", "a channel")?;
                let (name, details) = match raw.split_once(char::is_whitespace) {
                    Some((name, details)) => (name, details),
                    None => (raw, ""),
                };
                let channel = AgentChannel::parse(name).ok_or_else(|| invalid("channel", name))?;
                Self::Agent {
                    channel,
                    contact: parse_contact(details),
                }
            }
            other => {
                let field = Field::parse(other).ok_or_else(|| CommandError::Unknown(other.to_string()))?;
                let value = required(rest, "select", "a value")?;
                if field.label(value).is_none() {
                    return Err(invalid(other, value));
                }
                Self::Select {
                    field,
                    value: value.to_string(),
                }
            }
        };
        Ok(Some(command))
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

fn invalid(
    argument: &str,
    value: &str,
) -> CommandError {
    CommandError::InvalidValue {
        argument: argument.to_string(),
        value: value.to_string(),
    }
}

/// `name; email; phone; notes`, any of which may be left out.
fn parse_contact(details: &str) -> AgentContact {
    let mut parts = details.splitn(4, ';').map(str::to_string);
    AgentContact {
        name: parts.next().unwrap_or_default(),
        email: parts.next().unwrap_or_default(),
        phone: parts.next().unwrap_or_default(),
        notes: parts.next().unwrap_or_default(),
    }
    .trimmed()
}

/// Runs the wizard until `finish`, `quit` or end of input.
pub async fn run<R: BufRead, W: Write>(
    app: &mut App<TerminalView<W>>,
    input: R,
) -> Result<()> {
    app.wizard.open();
    app.wizard.view_mut().print_panel();

    for line in input.lines() {
        let line = line.context("cannot read wizard input")?;
        let command = match WizardCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                app.wizard.view_mut().notify(&e.to_string());
                continue;
            }
        };
        tracing::debug!(?command, "wizard command");

        match command {
            WizardCommand::Select { field, value } => app.wizard.select_chip(field, &value),
            WizardCommand::Next => {
                if !app.wizard.next() {
                    let missing: Vec<&str> = app
                        .wizard
                        .state()
                        .missing_fields()
                        .iter()
                        .map(|f| f.as_str())
                        .collect();
                    let message = if missing.is_empty() {
                        "You are on the last step.".to_string()
                    } else {
                        format!("Please choose: {}", missing.join(", "))
                    };
                    app.wizard.view_mut().notify(&message);
                }
            }
            WizardCommand::Back => {
                app.wizard.prev();
            }
            WizardCommand::Budget(amount) => app.wizard.set_budget(amount),
            WizardCommand::Down(pct) => app.wizard.set_down_pct(pct),
            WizardCommand::Bedrooms(count) => app.wizard.set_bedrooms(count),
            WizardCommand::Show => {}
            WizardCommand::Summary => {
                app.wizard.build_summary();
                continue;
            }
            WizardCommand::Save => {
                if let Err(e) = app.wizard.save(app.store.as_ref(), Utc::now()).await {
                    tracing::warn!(error = %e, "cannot save wizard progress");
                    app.wizard
                        .view_mut()
                        .notify("Could not save your progress on this device.");
                }
                continue;
            }
            WizardCommand::Agent { channel, contact } => {
                let link = app.wizard.agent_link(channel, &contact);
                app.wizard.view_mut().notify(&link);
                continue;
            }
            WizardCommand::Help => {
                app.wizard.view_mut().notify(HELP);
                continue;
            }
            WizardCommand::Finish => {
                app.wizard.finish();
                return Ok(());
            }
            WizardCommand::Quit => break,
        }
        app.wizard.view_mut().print_panel();
    }

    app.wizard.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_field_selection() {
        assert_eq!(
            WizardCommand::parse("salary 300000-600000").unwrap(),
            Some(WizardCommand::Select {
                field: Field::Salary,
                value: "300000-600000".to_string()
            })
        );
    }

    #[test]
    fn rejects_value_outside_chip_group() {
        assert_eq!(
            WizardCommand::parse("location abuja"),
            Err(CommandError::InvalidValue {
                argument: "location".to_string(),
                value: "abuja".to_string()
            })
        );
    }

    #[test]
    fn parses_slider_commands() {
        assert_eq!(
            WizardCommand::parse("budget ₦45,000,000").unwrap(),
            Some(WizardCommand::Budget(45_000_000))
        );
        assert_eq!(WizardCommand::parse("down 30%").unwrap(), Some(WizardCommand::Down(30)));
        assert_eq!(WizardCommand::parse("beds 4").unwrap(), Some(WizardCommand::Bedrooms(4)));
        assert!(WizardCommand::parse("down 120").is_err());
        assert!(WizardCommand::parse("budget lots").is_err());
    }

    #[test]
    fn blank_line_is_ignored_and_unknown_word_reported() {
        assert_eq!(WizardCommand::parse("   ").unwrap(), None);
        assert_eq!(
            WizardCommand::parse("jump"),
            Err(CommandError::Unknown("jump".to_string()))
        );
        assert_eq!(
            WizardCommand::parse("budget"),
            Err(CommandError::MissingArgument {
                command: "budget",
                argument: "an amount"
            })
        );
    }

    #[test]
    fn agent_command_reads_contact_fields() {
        let parsed = WizardCommand::parse("agent email Ada Obi; ada@example.com ;0800; ground floor")
            .unwrap()
            .unwrap();

        assert_eq!(
            parsed,
            WizardCommand::Agent {
                channel: AgentChannel::Email,
                contact: AgentContact {
                    name: "Ada Obi".to_string(),
                    email: "ada@example.com".to_string(),
                    phone: "0800".to_string(),
                    notes: "ground floor".to_string(),
                },
            }
        );
    }
}
