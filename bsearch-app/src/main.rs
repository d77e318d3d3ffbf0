use bsearch_common::observability::{LogConfig, init_logging};
use bsearch_config::SettingsLoader;
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
mod query;

/// Count Brave web search results for a query.
#[derive(Debug, Parser)]
#[command(name = "b", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Query terms; joined with single spaces.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    terms: Vec<OsString>,
}

impl Cli {
    /// Terms as text; bytes that are not UTF-8 become U+FFFD.
    fn query_terms(&self) -> Vec<String> {
        self.terms
            .iter()
            .map(|t| t.to_string_lossy().into_owned())
            .collect()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1) Settings from BRAVE_* (token included)
    let settings = match SettingsLoader::new().load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_logging(LogConfig {
        log_dir: settings.log_dir.clone(),
        format: settings.log_format,
        ..LogConfig::default()
    }) {
        eprintln!("{e:#}");
    }

    let terms = cli.query_terms();
    let mut stdout = io::stdout().lock();
    match query::run(&terms, &settings, &mut stdout).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "query finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = stdout.flush();
            tracing::debug!(error = %err, detail = ?err.detail(), "query failed");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
