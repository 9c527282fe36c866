use std::path::PathBuf;

use clap::Parser;

/// Serve a directory over HTTP.
///
/// Flags left unset fall back to the config file, then to the defaults
/// (`localhost:8000`, serving the current directory).
#[derive(Debug, Default, Parser)]
#[command(name = "webs", version, about)]
pub struct Args {
    /// Host name to bind
    #[arg(short = 'H', long, env = "WEBS_HOST")]
    pub host: Option<String>,

    /// Port number to bind
    #[arg(short, long, env = "WEBS_PORT")]
    pub port: Option<u16>,

    /// Directory to serve
    #[arg(short, long, env = "WEBS_ROOT")]
    pub root: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Value of the `Server` response header
    #[arg(long)]
    pub name: Option<String>,
}
