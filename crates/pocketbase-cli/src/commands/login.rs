//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pocketbase_core::RecordStore;
use pocketbase_http::PocketBaseClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Print the account as JSON
    #[arg(long)]
    pub raw: bool,
}

pub async fn run(args: LoginArgs, client: PocketBaseClient) -> Result<()> {
    eprintln!("{}", "Authenticating...".dimmed());

    let user = client
        .authenticate()
        .await
        .context("Failed to authenticate")?;

    output::success("Authenticated successfully");

    if args.raw {
        return output::json(
            &serde_json::json!({
                "id": user.id,
                "username": user.username,
                "email": user.email,
                "verified": user.verified,
            }),
            true,
        );
    }

    println!();
    output::field("Server", client.server_url().as_str());
    output::field("ID", &user.id);
    if let Some(username) = &user.username {
        output::field("Username", username);
    }
    if let Some(email) = &user.email {
        output::field("Email", email);
    }
    output::field("Verified", if user.verified { "yes" } else { "no" });

    Ok(())
}
