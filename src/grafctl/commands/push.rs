use crate::client::Client;
use crate::commands::CmdResult;
use crate::dashboard::{DashboardSaveResponse, Model};
use crate::error::Result;
use crate::store::{read_model, FileStore};
use tracing::{info, warn};

/// Reads dashboards from `<root>/db` and saves each one.
///
/// The first file that cannot be read or saved aborts the run.
pub fn run<S: AsRef<str>>(
    client: &Client,
    store: &FileStore,
    slugs: &[S],
    overwrite: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for path in store.push_targets(slugs)? {
        info!(file = %path.display(), "saving dashboard");
        let mut model = read_model(&path)?;
        let resp = save(client, &mut model, overwrite).map_err(|e| e.for_file(&path))?;
        info!(
            slug = %resp.slug,
            status = %resp.status,
            version = resp.version,
            "dashboard saved"
        );
        result.saved.push(resp);
    }
    Ok(result)
}

/// Saves `model`, retrying once as a create when the service answers 404.
///
/// A 404 on save means the model carries an `id` the service no longer knows
/// (deleted, or exported from another instance). Dropping the id turns the
/// second attempt into a create. There is never a third attempt.
pub fn save(client: &Client, model: &mut Model, overwrite: bool) -> Result<DashboardSaveResponse> {
    match client.save_dashboard(model, overwrite) {
        Err(err) if err.is_not_found() => {
            warn!("service returned 404, trying to create a new dashboard");
            model.shift_remove("id");
            client.save_dashboard(model, overwrite)
        }
        other => other,
    }
}
