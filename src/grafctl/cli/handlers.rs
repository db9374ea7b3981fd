use super::registry::Session;
use super::render::{command_help, general_help, render_list};
use super::setup::{GetOptions, HelpOptions, ListOptions, PushOptions};
use clap::error::ErrorKind;
use clap::Parser;
use grafctl::commands;
use grafctl::error::{GrafctlError, Result};
use grafctl::store::FileStore;
use tracing::warn;

/// Parses a command's own options. `None` means `--help` was handled.
fn parse_options<T: Parser>(
    session: &Session<'_>,
    name: &str,
    args: &[String],
) -> Result<Option<T>> {
    let argv = std::iter::once(name.to_string()).chain(args.iter().cloned());
    match T::try_parse_from(argv) {
        Ok(opts) => Ok(Some(opts)),
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            if let Some(spec) = session.registry.find(name) {
                print!("{}", command_help(spec));
            }
            Ok(None)
        }
        Err(e) => Err(GrafctlError::Usage(e.to_string().trim_end().to_string())),
    }
}

pub fn get(session: &Session<'_>, args: &[String]) -> Result<()> {
    let Some(opts) = parse_options::<GetOptions>(session, "get", args)? else {
        return Ok(());
    };
    let root = opts.path.unwrap_or_else(|| session.options.path.clone());
    let client = session.client()?;
    commands::get::run(&client, &FileStore::new(root), &opts.dashboards)?;
    Ok(())
}

pub fn list(session: &Session<'_>, args: &[String]) -> Result<()> {
    let Some(opts) = parse_options::<ListOptions>(session, "list", args)? else {
        return Ok(());
    };
    let client = session.client()?;
    let result = commands::list::run(&client)?;
    print!("{}", render_list(&result.entries, opts.format)?);
    Ok(())
}

pub fn push(session: &Session<'_>, args: &[String]) -> Result<()> {
    let Some(opts) = parse_options::<PushOptions>(session, "push", args)? else {
        return Ok(());
    };
    let root = opts.path.unwrap_or_else(|| session.options.path.clone());
    let client = session.client()?;
    commands::push::run(&client, &FileStore::new(root), &opts.dashboards, opts.overwrite)?;
    Ok(())
}

/// Prints general help, or the help of one command. Always succeeds.
pub fn help(session: &Session<'_>, args: &[String]) -> Result<()> {
    let topics = match parse_options::<HelpOptions>(session, "help", args) {
        Ok(Some(opts)) => opts.topics,
        Ok(None) => return Ok(()),
        Err(_) => Vec::new(),
    };

    match topics.as_slice() {
        [topic] => match session.registry.find(topic) {
            Some(spec) => print!("{}", command_help(spec)),
            None => {
                warn!(command = %topic, "unknown command");
                print!("{}", general_help(session.registry));
            }
        },
        _ => print!("{}", general_help(session.registry)),
    }
    Ok(())
}
