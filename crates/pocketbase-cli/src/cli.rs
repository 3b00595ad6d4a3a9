//! CLI argument definitions.

use anyhow::{Context, Result};
use clap::{Args, Parser};

use pocketbase_core::credentials::DEFAULT_AUTH_COLLECTION;
use pocketbase_core::{ClientConfig, Credentials, ServerUrl};
use pocketbase_http::PocketBaseClient;

use crate::commands::Command;

/// PocketBase CLI tool for record exploration.
#[derive(Parser, Debug)]
#[command(name = "pb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Server and credentials, from flags or the environment.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// PocketBase server URL
    #[arg(long, env = "POCKETBASE_URL", default_value = "http://127.0.0.1:8090", global = true)]
    pub url: String,

    /// Email or username to authenticate with
    #[arg(long, env = "POCKETBASE_IDENTITY", global = true)]
    pub identity: Option<String>,

    /// Account password
    #[arg(long, env = "POCKETBASE_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Auth collection the account belongs to
    #[arg(
        long,
        env = "POCKETBASE_AUTH_COLLECTION",
        default_value = DEFAULT_AUTH_COLLECTION,
        global = true
    )]
    pub auth_collection: String,
}

impl ConnectionArgs {
    /// Build a client that authenticates silently on first use.
    pub fn client(&self) -> Result<PocketBaseClient> {
        let url = ServerUrl::new(&self.url).context("Invalid server URL")?;
        let identity = self
            .identity
            .as_deref()
            .context("No identity given. Pass --identity or set POCKETBASE_IDENTITY.")?;
        let password = self
            .password
            .as_deref()
            .context("No password given. Pass --password or set POCKETBASE_PASSWORD.")?;

        let credentials =
            Credentials::new(identity, password).with_collection(&self.auth_collection);
        let config = ClientConfig::new(url, credentials);
        PocketBaseClient::new(&config).context("Failed to create client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_list_with_query_flags() {
        let cli = Cli::try_parse_from([
            "pb",
            "--url",
            "http://localhost:8090",
            "--identity",
            "ada@example.com",
            "--password",
            "secret",
            "list",
            "todoItems",
            "--filter",
            "isCompleted=false",
            "--sort",
            "-created",
            "--page",
            "2",
            "--per-page",
            "10",
        ])
        .unwrap();

        assert_eq!(cli.connection.url, "http://localhost:8090");
        assert_eq!(cli.connection.auth_collection, "users");
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.collection, "todoItems");
                assert_eq!(args.filter.as_deref(), Some("isCompleted=false"));
                assert_eq!(args.sort.as_deref(), Some("-created"));
                assert_eq!(args.page, 2);
                assert_eq!(args.per_page, 10);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pb",
            "get",
            "todoItems",
            "abc123",
            "-vv",
            "--auth-collection",
            "_superusers",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.connection.auth_collection, "_superusers");
        assert!(matches!(cli.command, Command::Get(_)));
    }

    #[test]
    fn update_requires_a_record_id() {
        assert!(Cli::try_parse_from(["pb", "update", "todoItems"]).is_err());
    }

    #[test]
    fn zero_page_is_rejected_by_the_client() {
        let cli = Cli::try_parse_from(["pb", "list", "todoItems", "--page", "0"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert!(args.pagination().is_err());
    }

    #[test]
    fn missing_credentials_are_reported() {
        let connection = ConnectionArgs {
            url: "http://127.0.0.1:8090".to_string(),
            identity: None,
            password: None,
            auth_collection: "users".to_string(),
        };
        let err = connection.client().unwrap_err();
        assert!(err.to_string().contains("identity"));
    }
}
