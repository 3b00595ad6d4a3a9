//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pocketbase_core::{PaginationOptions, Query, RecordStore};
use pocketbase_http::PocketBaseClient;

use crate::output;
use crate::record::AnyRecord;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection name or id
    pub collection: String,

    /// Filter expression, e.g. 'isCompleted=false && created>"2024-01-01"'
    #[arg(long)]
    pub filter: Option<String>,

    /// Sort fields, comma separated, '-' for descending
    #[arg(long)]
    pub sort: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value_t = PaginationOptions::DEFAULT_PAGE_NUMBER)]
    pub page: u32,

    /// Records per page
    #[arg(long, default_value_t = PaginationOptions::DEFAULT_ITEMS_PER_PAGE)]
    pub per_page: u32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ListArgs {
    pub fn pagination(&self) -> Result<PaginationOptions> {
        PaginationOptions::new(self.page, self.per_page).context("Invalid pagination")
    }

    fn query(&self) -> Result<Query> {
        let mut query = Query::new().with_pagination(self.pagination()?);
        if let Some(filter) = &self.filter {
            query = query.with_filter(filter.as_str());
        }
        if let Some(sort) = &self.sort {
            query = query.with_sorting(sort.as_str());
        }
        Ok(query)
    }
}

pub async fn run(args: ListArgs, client: PocketBaseClient) -> Result<()> {
    let query = args.query()?;

    let page = client
        .list_records::<AnyRecord>(&args.collection, &query)
        .await
        .context("Failed to list records")?;

    if page.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    for record in &page.items {
        output::json(record, args.pretty)?;
    }

    eprintln!();
    eprintln!(
        "{}: {}/{} ({} records)",
        "Page".dimmed(),
        page.page_offset,
        page.total_pages,
        page.total_items
    );

    Ok(())
}
