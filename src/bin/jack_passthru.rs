use clap::Parser;
use jack_passthru::common::{
    config::{ClientConfig, DEFAULT_PORT_PAIRS},
    error::EXIT_FAILURE,
};
use jack_passthru::sound::client;
use log::error;
use std::process::ExitCode;

/// Copy every jack input port straight to its paired output port
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Client name (defaults to the executable name)
    #[arg(short, long)]
    name: Option<String>,

    /// Number of input/output port pairs
    #[arg(short, long, default_value_t = DEFAULT_PORT_PAIRS)]
    ports: usize,

    /// Do not start a jack server if none is running
    #[arg(long)]
    no_start_server: bool,

    /// Connect system capture/playback ports to the pairs after activation
    #[arg(short, long)]
    connect_system: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match ClientConfig::build(
        args.name,
        args.ports,
        !args.no_start_server,
        args.connect_system,
    ) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match client::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
