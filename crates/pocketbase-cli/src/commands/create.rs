//! Create command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use pocketbase_core::{Record, RecordStore};
use pocketbase_http::PocketBaseClient;

use crate::commands::PayloadArgs;
use crate::output;
use crate::record::AnyRecord;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Collection name or id
    pub collection: String,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

pub async fn run(args: CreateArgs, client: PocketBaseClient) -> Result<()> {
    let payload = Value::Object(args.payload.read()?);

    let record = client
        .create_record::<AnyRecord>(&args.collection, &payload)
        .await
        .context("Failed to create record")?;

    println!("{}", record.meta().id);
    output::success(&format!("Created record: {}", record.meta().id));

    Ok(())
}
