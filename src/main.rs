use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::fmt;

pub mod cli;
pub mod exec;
pub mod query;
pub mod render;
pub mod store;

fn main() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    run(args)
}

pub fn run(args: cli::Args) -> Result<()> {
    let store = match &args.data {
        Some(path) => {
            let store = store::MemoryStore::from_manifest(path)?;
            info!(buckets = %store.bucket_names().join(", "), "manifest loaded");
            store
        }
        None => {
            info!("no manifest given; starting with an empty store");
            store::MemoryStore::new()
        }
    };

    match args.query {
        Some(sql) => cli::handle_input(&store, &sql, args.strict),
        None => cli::repl(&store, args.strict),
    }
}
