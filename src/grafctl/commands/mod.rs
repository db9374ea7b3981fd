use crate::dashboard::{DashboardEntry, DashboardSaveResponse};
use std::path::PathBuf;

pub mod get;
pub mod list;
pub mod push;

/// What a command did, for the CLI layer to render.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub entries: Vec<DashboardEntry>,
    pub written: Vec<PathBuf>,
    pub saved: Vec<DashboardSaveResponse>,
}

impl CmdResult {
    pub fn with_entries(mut self, entries: Vec<DashboardEntry>) -> Self {
        self.entries = entries;
        self
    }
}
