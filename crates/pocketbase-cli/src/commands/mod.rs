//! Subcommand implementations.

mod create;
mod delete;
mod get;
mod list;
mod login;
mod update;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use pocketbase_http::PocketBaseClient;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authenticate and show the signed-in account
    Login(login::LoginArgs),

    /// List records in a collection
    List(list::ListArgs),

    /// Fetch a single record
    Get(get::GetArgs),

    /// Create a record
    Create(create::CreateArgs),

    /// Update fields of a record
    Update(update::UpdateArgs),

    /// Delete a record
    Delete(delete::DeleteArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login(_) => "login",
            Command::List(_) => "list",
            Command::Get(_) => "get",
            Command::Create(_) => "create",
            Command::Update(_) => "update",
            Command::Delete(_) => "delete",
        }
    }
}

pub async fn handle(command: Command, client: PocketBaseClient) -> Result<()> {
    let name = command.name();
    debug!(command = name, server = %client.server_url().as_str(), "dispatching command");

    let result = match command {
        Command::Login(args) => login::run(args, client).await,
        Command::List(args) => list::run(args, client).await,
        Command::Get(args) => get::run(args, client).await,
        Command::Create(args) => create::run(args, client).await,
        Command::Update(args) => update::run(args, client).await,
        Command::Delete(args) => delete::run(args, client).await,
    };

    if let Err(e) = &result {
        warn!(command = name, error = %e, "command failed");
    }
    result
}

/// Where a JSON object payload comes from.
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Inline JSON object
    #[arg(long, conflicts_with = "json")]
    pub data: Option<String>,

    /// JSON file with the record fields (use - for stdin)
    #[arg(long)]
    pub json: Option<String>,
}

impl PayloadArgs {
    /// Read the payload as a JSON object.
    pub fn read(&self) -> Result<Map<String, Value>> {
        let raw = match (&self.data, &self.json) {
            (Some(data), _) => data.clone(),
            (None, Some(path)) if path == "-" => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read from stdin")?;
                buf
            }
            (None, Some(path)) => {
                std::fs::read_to_string(path).context("Failed to read JSON file")?
            }
            (None, None) => anyhow::bail!("No payload given. Pass --data or --json."),
        };

        match serde_json::from_str(&raw).context("Invalid JSON payload")? {
            Value::Object(fields) => Ok(fields),
            _ => anyhow::bail!("The payload must be a JSON object"),
        }
    }
}
