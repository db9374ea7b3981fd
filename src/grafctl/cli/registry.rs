//! The fixed set of commands and the dispatcher that runs them.
//!
//! A [`Registry`] is built once at startup and only read afterwards. Each
//! [`CommandSpec`] carries its help texts, its own option set and a handler.
//! Handlers receive the remaining arguments unparsed and parse them with their
//! option set, so every command owns its flags.

use super::handlers;
use super::setup::{GetOptions, HelpOptions, ListOptions, PushOptions};
use clap::CommandFactory;
use grafctl::client::Client;
use grafctl::config::GlobalOptions;
use grafctl::error::{GrafctlError, Result};
use tracing::debug;

pub type Handler = fn(&Session<'_>, &[String]) -> Result<()>;

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    pub help: &'static str,
    pub options: fn() -> clap::Command,
    pub handler: Handler,
}

/// What a running command can reach.
pub struct Session<'a> {
    pub registry: &'a Registry,
    pub options: &'a GlobalOptions,
    connect: &'a dyn Fn(&GlobalOptions) -> Result<Client>,
}

impl Session<'_> {
    /// Builds the API client. Commands that never talk to the service don't call this.
    pub fn client(&self) -> Result<Client> {
        (self.connect)(self.options)
    }
}

pub struct Registry {
    commands: Vec<CommandSpec>,
}

impl Registry {
    /// # Panics
    /// If two commands share a name.
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        for (i, cmd) in commands.iter().enumerate() {
            assert!(
                commands[..i].iter().all(|c| c.name != cmd.name),
                "duplicate command name: {}",
                cmd.name
            );
        }
        Self { commands }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            CommandSpec {
                name: "get",
                usage: "[OPTIONS] [DASHBOARD...]",
                summary: "Retrieve dashboards and save to file.",
                help: "The get command retrieves dashboards and saves them to file.\n\
                       Dashboards must be named; retrieving all dashboards is not implemented.",
                options: GetOptions::command,
                handler: handlers::get,
            },
            CommandSpec {
                name: "help",
                usage: "[COMMAND]",
                summary: "Print command usage and options.",
                help: "grafctl uses the Grafana API to manage dashboards.\n\
                       Use 'grafctl help COMMAND' for the options of a single command.",
                options: HelpOptions::command,
                handler: handlers::help,
            },
            CommandSpec {
                name: "list",
                usage: "[OPTIONS]",
                summary: "List dashboards.",
                help: "The list command lists dashboard names and meta information.",
                options: ListOptions::command,
                handler: handlers::list,
            },
            CommandSpec {
                name: "push",
                usage: "[OPTIONS] [DASHBOARD...]",
                summary: "Read dashboards from file and push to Grafana.",
                help: "The push command reads dashboards from file and pushes them to Grafana.\n\
                       If no dashboards are specified, push all dashboards in the specified path.\n\
                       Specify dashboards by slug, e.g. 'db/foo' or just 'foo'.\n\
                       \n\
                       Since only database-stored dashboards can be saved through the \
                       Grafana API,\n\
                       only dashboards in the 'db' sub-directory are pushed.",
                options: PushOptions::command,
                handler: handlers::push,
            },
        ])
    }

    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Runs the command called `name` with `args`.
    ///
    /// `connect` builds the API client on demand, so commands that don't
    /// talk to the service never need a valid URL.
    pub fn dispatch<F>(
        &self,
        options: &GlobalOptions,
        name: &str,
        args: &[String],
        connect: F,
    ) -> Result<()>
    where
        F: Fn(&GlobalOptions) -> Result<Client>,
    {
        let spec = self
            .find(name)
            .ok_or_else(|| GrafctlError::UnknownCommand(name.to_string()))?;
        debug!(command = spec.name, args = ?args, "running command");
        let session = Session {
            registry: self,
            options,
            connect: &connect,
        };
        (spec.handler)(&session, args)
    }
}
