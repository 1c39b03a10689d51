mod cli_args;
mod lookup;
mod output;

use cli_args::CliArgs;
use configuration::{ClientConfiguration, ConfigurationError, QueryDefaults};
use output::Banner;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(early) => {
            return match early.status {
                Ok(()) => {
                    println!("{}", early.output);
                    ExitCode::SUCCESS
                }
                Err(()) => {
                    println!("ERROR\tIncorrect input syntax: {}", early.output.trim());
                    ExitCode::FAILURE
                }
            };
        }
    };

    let cfg = match load_configuration(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("ERROR\t{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?cfg, "configuration loaded");

    print!("{}", Banner::new(cfg.query(), cfg.server()));

    let report = lookup::lookup(&cfg, &mut dns::RandomIds::new()).await;
    print!("{}", report);

    if report.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn load_configuration(cli: &CliArgs) -> Result<ClientConfiguration, ConfigurationError> {
    let defaults: QueryDefaults = configuration::get_config(&cli.config)?;
    ClientConfiguration::new(&defaults, &cli.to_options())
}
