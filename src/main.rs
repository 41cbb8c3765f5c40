use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use initializr_resource::initializr::InitializrClient;
use initializr_resource::logging::init_logging;
use initializr_resource::resource::check::{CheckRequest, run_check};
use initializr_resource::resource::get::{GetRequest, run_get};
use initializr_resource::resource::put::run_put;
use initializr_resource::resource::{decode_request, save_request};

#[derive(Parser)]
#[command(name = "initializr-resource")]
#[command(
    version,
    about = "Concourse resource for Spring Boot versions published by Spring Initializr"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the versions newer than the one in the request
    Check,
    /// Download the project for the requested version into DESTINATION
    #[command(visible_alias = "get")]
    In { destination: PathBuf },
    /// Not supported, the resource is read-only
    #[command(visible_alias = "put")]
    Out { sources: PathBuf },
}

/// Operations that can be selected through the executable name
const OPERATIONS: [&str; 3] = ["check", "in", "out"];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(dispatch_args(std::env::args_os()));
    let _guards = init_logging();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

/// Inserts the operation when the binary is invoked as `/opt/resource/check`,
/// `/opt/resource/in` or `/opt/resource/out`.
fn dispatch_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args: Vec<OsString> = args.into_iter().collect();

    let operation = args
        .first()
        .and_then(|program| Path::new(program).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| OPERATIONS.contains(name))
        .map(OsString::from);

    if let Some(operation) = operation {
        args.insert(1, operation);
    }

    args
}

async fn run(command: Command) -> anyhow::Result<()> {
    let mut raw = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut raw)
        .await
        .context("reading request from stdin")?;

    match command {
        Command::Check => {
            save_request("check", &raw);
            let request: CheckRequest = decode_request(&raw).context("decoding request")?;
            let client = InitializrClient::from_source(&request.source)
                .context("error creating HTTP client")?;

            let response = run_check(&client, &request).await?;
            write_response(&response)
        }
        Command::In { destination } => {
            save_request("in", &raw);
            let request: GetRequest = decode_request(&raw).context("decoding request")?;
            let client = InitializrClient::from_source(&request.source)
                .context("error creating HTTP client")?;

            let response = run_get(&client, &destination, &request).await?;
            write_response(&response)
        }
        Command::Out { sources } => Ok(run_put(&sources)?),
    }
}

fn write_response<T: Serialize>(response: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, response).context("writing response to stdout")?;
    writeln!(stdout).context("writing response to stdout")?;
    Ok(())
}
