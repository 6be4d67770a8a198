use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use seb::app::{App, StartOptions};
use seb::config::Config;
use seb::error::{AppError, AppResult};
use seb::logging::init_logging;
use seb::widget::SearchRequest;

/// Terminal search entry with engine selection and live suggestions.
#[derive(Debug, Parser)]
#[command(name = "seb", version)]
struct Args {
    /// Config file (default: $SEB_CONFIG_PATH or the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Engine id to start on instead of the configured default.
    #[arg(long)]
    engine: Option<String>,

    /// Start with suggestions switched off.
    #[arg(long)]
    no_suggestions: bool,

    /// Print submitted searches as JSON lines on exit.
    #[arg(long)]
    print_requests: bool,
}

impl Args {
    fn start_options(&self) -> StartOptions {
        StartOptions {
            config_path: self.config.clone(),
            engine: self.engine.clone().filter(|engine| !engine.trim().is_empty()),
            suggestions: self.no_suggestions.then_some(false),
        }
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let args = Args::parse();
    let options = args.start_options();

    let config = match &options.config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let _log_guard = init_logging(&config.log);

    let mut app = App::new_with_config(config, options);
    app.run().await?;

    if args.print_requests {
        let stdout = io::stdout();
        write_requests(&mut stdout.lock(), app.submitted())?;
    }
    Ok(())
}

fn write_requests(out: &mut impl Write, requests: &[SearchRequest]) -> AppResult<()> {
    for request in requests {
        let line = serde_json::to_string(request)
            .map_err(|err| AppError::invalid_argument(format!("unencodable request: {err}")))?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}
