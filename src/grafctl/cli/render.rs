//! # Rendering
//!
//! Turns command results and the registry into text. Everything here returns
//! a `String`; printing is left to the handlers so the layout can be tested.
//!
//! Help output keeps the manual-page layout grafctl has always had:
//! upper-case section names, tab indented bodies.

use super::registry::{CommandSpec, Registry};
use super::setup::{get_version, Cli, ListFormat};
use clap::CommandFactory;
use colored::Colorize;
use grafctl::dashboard::{to_indented_json, DashboardEntry};
use grafctl::error::Result;

const LONG_HEADER: &str = "ID     URI                                      TITLE";

/// Renders the dashboard inventory in the requested format.
pub fn render_list(entries: &[DashboardEntry], format: ListFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        ListFormat::Short => {
            for entry in entries {
                out.push_str(&entry.uri);
                out.push('\n');
            }
        }
        ListFormat::Long => {
            out.push_str(LONG_HEADER);
            out.push('\n');
            for entry in entries {
                out.push_str(&format!(
                    "{:<6} {:<40} {:<40}\n",
                    entry.id, entry.uri, entry.title
                ));
            }
        }
        ListFormat::Json => {
            out.push_str(&String::from_utf8_lossy(&to_indented_json(entries)?));
            out.push('\n');
        }
    }
    Ok(out)
}

fn section(out: &mut String, name: &str) {
    out.push('\n');
    out.push_str(&format!("{}\n", name.bold()));
}

/// One entry per option: `-v, --verbose` or `--url=[default]`, help below.
fn option_lines(cmd: &clap::Command) -> String {
    let mut out = String::new();
    for arg in cmd.get_arguments() {
        if arg.is_positional() || arg.is_hide_set() {
            continue;
        }
        let Some(long) = arg.get_long() else {
            continue;
        };
        if matches!(long, "help" | "version") {
            continue;
        }

        let mut flag = match arg.get_short() {
            Some(short) => format!("-{}, --{}", short, long),
            None => format!("--{}", long),
        };
        let mut help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
        if arg.get_action().takes_values() {
            let defaults: Vec<_> = arg
                .get_default_values()
                .iter()
                .map(|v| v.to_string_lossy().into_owned())
                .collect();
            flag.push_str(&format!("=[{}]", defaults.join(",")));

            let choices: Vec<_> = arg
                .get_possible_values()
                .iter()
                .map(|v| v.get_name().to_string())
                .collect();
            if !choices.is_empty() {
                help.push_str(&format!(": {}", choices.join(", ")));
            }
        }

        out.push_str(&format!("\t{}\n\t\t{}\n", flag, help));
    }
    out
}

/// Help for the whole program: global options and every registered command.
pub fn general_help(registry: &Registry) -> String {
    let mut out = String::new();
    out.push_str(&format!("grafctl {}\n", get_version()));

    section(&mut out, "SYNOPSIS");
    out.push_str("\tgrafctl is a backup/restore utility for Grafana dashboards.\n");

    section(&mut out, "USAGE");
    out.push_str("\tgrafctl [OPTIONS] COMMAND [COMMAND OPTIONS]\n");

    section(&mut out, "OPTIONS");
    out.push_str(&option_lines(&Cli::command()));

    section(&mut out, "COMMANDS");
    for cmd in registry.commands() {
        out.push_str(&format!("\t{} {}\n\t\t{}\n", cmd.name, cmd.usage, cmd.summary));
    }
    out
}

/// Help for a single command, with its own options.
pub fn command_help(spec: &CommandSpec) -> String {
    let mut out = String::new();
    out.push_str(&format!("grafctl {}\n", spec.name));

    section(&mut out, "SYNOPSIS");
    out.push_str(&format!("\t{}\n", spec.summary));

    section(&mut out, "USAGE");
    out.push_str(&format!("\tgrafctl [OPTIONS] {} {}\n", spec.name, spec.usage));

    section(&mut out, "DESCRIPTION");
    for line in spec.help.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("\t{}\n", line.trim()));
        }
    }

    let options = option_lines(&(spec.options)());
    if !options.is_empty() {
        section(&mut out, "OPTIONS");
        out.push_str(&options);
    }
    out
}
