//! Run one sobjects read against a live org and print the raw response.
//!
//! ```sh
//! export SF_ACCESS_TOKEN='00D...!...'
//! export SF_INSTANCE_URL='na7.salesforce.com'
//! cargo run --bin asf-probe -- Account describe
//! cargo run --bin asf-probe -- Account soql 'SELECT+Id+FROM+Account+LIMIT+5'
//! ```

use std::sync::Arc;

use asf_rest::{AdapterConfig, CachedAdapter, MemoryCache, RawResponse, SObjectAdapter};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "asf-probe", version, about = "Probe the Force.com sobjects REST API")]
struct Cli {
    /// sobject type name, e.g. Account
    sobject: String,

    /// Run the operation this many times; repeats are served from the cache
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full describe of the type (fails on non-200)
    Describe,
    /// Basic metadata and recent items
    Meta,
    /// Global describe of every type
    Global,
    /// Resources of the API version
    Resources,
    /// Available API versions
    Versions,
    /// Run a URL-encoded SOQL query
    Soql { query: String },
    /// Run a URL-encoded SOSL search
    Sosl { search: String },
    /// Fetch one record by id
    Find { id: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = AdapterConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("  export SF_ACCESS_TOKEN='<session id>'");
        eprintln!("  export SF_INSTANCE_URL='na7.salesforce.com'");
        std::process::exit(1);
    });

    let adapter = SObjectAdapter::new(config, &cli.sobject).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let cached = CachedAdapter::new(adapter, Arc::new(MemoryCache::new()));

    for attempt in 1..=cli.repeat.max(1) {
        tracing::info!(attempt, sobject = %cli.sobject, "running probe");
        if let Err(e) = run(&cached, &cli.cmd).await {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cached: &CachedAdapter, cmd: &Command) -> asf_rest::Result<()> {
    let response = match cmd {
        Command::Describe => {
            let body = cached.get_detail_info().await?;
            print_body(200, &body);
            return Ok(());
        }
        Command::Meta => cached.get_meta_data().await?,
        Command::Global => cached.describe_global().await?,
        Command::Resources => cached.list_available_resources().await?,
        Command::Versions => cached.get_version().await?,
        Command::Soql { query } => cached.run_soql(query).await?,
        Command::Sosl { search } => cached.run_sosl(search).await?,
        Command::Find { id } => cached.find(id).await?,
    };
    print_response(&response);
    Ok(())
}

fn print_response(response: &RawResponse) {
    print_body(response.status, &response.body);
}

fn print_body(status: u16, body: &str) {
    println!("HTTP {status}");
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string())
        ),
        Err(_) => println!("{body}"),
    }
}
