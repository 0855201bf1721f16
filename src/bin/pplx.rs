//! pplx - Send one fixed question to Perplexity and print the raw response.
//!
//! Reads the key from `PPLX_API_KEY`. Exits 1 on any failure.

use clap::Parser;
use pplx_chat::cli::{api_key_from_env, describe_failure, run};
use pplx_chat::config::Config;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pplx")]
#[command(about = "Send one fixed question to Perplexity AI and print the raw JSON response")]
#[command(version)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let result = api_key_from_env().and_then(|key| {
        let config = Config::load_with_env();
        run(&config.api.endpoint, &key)
    });

    match result {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", describe_failure(&err));
            ExitCode::FAILURE
        }
    }
}
