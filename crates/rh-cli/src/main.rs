//! rh-migrate - one-shot MealType migration for the ReceiptHealth store

use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::migrate;
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = match RuntimeContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(err) => migrate::fail(&err, &RuntimeContext::fallback(&cli)),
    };

    if let Err(err) = migrate::execute(&ctx) {
        migrate::fail(&err, &ctx);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
