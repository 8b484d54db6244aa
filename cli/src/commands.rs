use clap::{ArgAction, Parser};
use mssqlinfo_core::browser::{DEFAULT_BROWSER_HOST, DEFAULT_BROWSER_PORT, DEFAULT_INSTANCE_NAME};

// The short help flag is disabled so `-h` can keep meaning `--host`, as the
// tool has always spelled it. `--help` still works.
#[derive(Parser)]
#[command(name = "mssqlinfo")]
#[command(about = "Query the SQL Server Browser for named instance metadata.")]
#[command(version, disable_help_flag = true)]
pub struct CommandLine {
    /// Hostname running the SQL Server Browser
    #[arg(short = 'h', long, default_value = DEFAULT_BROWSER_HOST)]
    pub host: String,

    /// Instance name to look up
    #[arg(short, long, default_value = DEFAULT_INSTANCE_NAME)]
    pub instance: String,

    /// UDP port of the SQL Server Browser
    #[arg(short, long, default_value_t = DEFAULT_BROWSER_PORT)]
    pub port: u16,

    /// Print only the named attribute, e.g. ServerName, InstanceName,
    /// IsClustered, Version, tcp, np or via
    #[arg(long, value_name = "KEY")]
    pub value: Option<String>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
