//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pocketbase_core::RecordStore;
use pocketbase_http::PocketBaseClient;

use crate::output;
use crate::record::AnyRecord;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Collection name or id
    pub collection: String,

    /// Record id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, client: PocketBaseClient) -> Result<()> {
    let record = client
        .get_record::<AnyRecord>(&args.collection, &args.id)
        .await
        .with_context(|| format!("Failed to fetch record {}", args.id))?;

    output::json(&record, args.pretty)
}
