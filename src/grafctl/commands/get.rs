use crate::client::Client;
use crate::commands::CmdResult;
use crate::error::{GrafctlError, Result};
use crate::store::{normalize_slug, FileStore};
use tracing::{debug, info};

/// Fetches each dashboard and writes its model to `<root>/<slug>.json`.
///
/// Stops at the first failure; files already written stay on disk.
pub fn run<S: AsRef<str>>(client: &Client, store: &FileStore, slugs: &[S]) -> Result<CmdResult> {
    if slugs.is_empty() {
        return Err(GrafctlError::Unsupported(
            "get all not implemented, name the dashboards to retrieve".into(),
        ));
    }

    let mut result = CmdResult::default();
    for slug in slugs {
        let slug = normalize_slug(slug.as_ref());
        let dash = client
            .dashboard(slug)
            .map_err(|e| e.for_dashboard(slug))?;

        let file = store.dashboard_file(slug);
        info!(dashboard = %slug, file = %file.display(), "saving dashboard");
        let path = store
            .write_model(slug, &dash.model)
            .map_err(|e| e.for_dashboard(slug))?;
        debug!(dashboard = %slug, file = %path.display(), "successfully wrote file");
        result.written.push(path);
    }
    Ok(result)
}
