use crate::client::Client;
use crate::commands::CmdResult;
use crate::error::Result;

pub fn run(client: &Client) -> Result<CmdResult> {
    let entries = client.list_dashboards()?;
    Ok(CmdResult::default().with_entries(entries))
}
