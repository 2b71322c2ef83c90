//! sqa-cli: stock analysis from the command line
//! Usage: sqa-cli <command> [options]

use std::io::{self, Write};

use sqa_cli::commands::Context;
use sqa_cli::data::FileSource;
use sqa_cli::talib::IndicatorRegistry;
use sqa_cli::{Config, Dispatcher};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let _ = dotenv::dotenv();

    let (config, config_error) = Config::load_or_default();
    if let Some(e) = config_error {
        eprintln!("Warning: {e}. Using default settings.");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();
    debug!(data_dir = %config.data_dir.display(), "configured");

    let context = Context::new(
        Box::new(FileSource::new(config.data_dir)),
        IndicatorRegistry::talib(),
    );
    let args: Vec<String> = std::env::args().skip(1).collect();

    let status = Dispatcher::new(context).run(&args, &mut io::stdout(), &mut io::stderr());
    let _ = io::stdout().flush();
    std::process::exit(status);
}
