mod commands;
mod terminal;

use std::process::ExitCode;

use commands::CommandLine;
use mssqlinfo_core::browser::{BrowserClient, InstanceQuery};
use mssqlinfo_core::response::{self, InstanceInfo};
use terminal::logging;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init();

    let query = InstanceQuery {
        host: commands.host,
        instance: commands.instance,
        port: commands.port,
    };

    let client = BrowserClient::new();
    let raw = match client.query(&query).await {
        Ok(raw) => raw,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let info: InstanceInfo = response::parse(raw);

    match commands.value {
        None => {
            for (key, value) in info.iter() {
                println!("{key} = {value}");
            }
            ExitCode::SUCCESS
        }
        // Missing key: no output on stdout, just the failure status.
        Some(key) => match info.get(&key) {
            Some(value) => {
                println!("{value}");
                ExitCode::SUCCESS
            }
            None => ExitCode::FAILURE,
        },
    }
}
