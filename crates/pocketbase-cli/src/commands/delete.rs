//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pocketbase_core::RecordStore;
use pocketbase_http::PocketBaseClient;

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Collection name or id
    pub collection: String,

    /// Record id
    pub id: String,
}

pub async fn run(args: DeleteArgs, client: PocketBaseClient) -> Result<()> {
    client
        .delete_record(&args.collection, &args.id)
        .await
        .with_context(|| format!("Failed to delete record {}", args.id))?;

    output::success(&format!("Deleted record: {}", args.id));

    Ok(())
}
