//! Update command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pocketbase_core::RecordStore;
use pocketbase_http::PocketBaseClient;

use crate::commands::PayloadArgs;
use crate::output;
use crate::record::AnyRecord;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Collection name or id
    pub collection: String,

    /// Record id
    pub id: String,

    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Pretty-print the updated record
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: UpdateArgs, client: PocketBaseClient) -> Result<()> {
    let fields = args.payload.read()?;

    let record = client
        .update_record::<AnyRecord>(&args.collection, &args.id, &fields)
        .await
        .with_context(|| format!("Failed to update record {}", args.id))?;

    output::json(&record, args.pretty)?;
    output::success(&format!("Updated record: {}", args.id));

    Ok(())
}
