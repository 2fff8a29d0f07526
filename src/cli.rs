use crate::config::{load_env_files, Config, ConfigFile};
use crate::constants::ENV_FILE_CANDIDATES;
use crate::errors::AppResult;
use crate::fetcher::ApiClient;
use crate::orchestrator::{self, RunSummary};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
pub fn command() -> Command<'static> {
    Command::new("hslu-fetch")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .after_help("Requires API_URL and ACCESS_KEY in the environment or a .env file.\nOptional: REQUEST_TIMEOUT_SECONDS (default 10), REQUEST_DELAY_SECONDS (default 0.1).")
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .help("Base directory for the JSON files")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML file with output_dir, request_timeout_seconds and request_delay_seconds")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("env_file")
                .short('e')
                .long("env-file")
                .help("Load variables from this file instead of ./.env or ./scraper/.env")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Resolves the configuration from parsed arguments.
///
/// Loads the `.env` file, then the optional TOML file, then the environment;
/// `--output-dir` wins over everything else. No HTTP client exists yet, so a
/// failure here aborts before any request.
pub fn resolve_config(matches: &ArgMatches) -> AppResult<Config> {
    match matches.get_one::<PathBuf>("env_file") {
        Some(path) => load_env_files(std::slice::from_ref(path)),
        None => load_env_files(ENV_FILE_CANDIDATES),
    };

    let file_config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ConfigFile::from_toml_file(path)?,
        None => ConfigFile::default(),
    };

    let mut config = Config::from_env(&file_config)?;
    if let Some(dir) = matches.get_one::<PathBuf>("output_dir") {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

/// Parses command-line arguments and runs the fetch workflow.
///
/// # Returns
///
/// Returns the run summary. Only configuration problems are errors; failed
/// requests and empty lists are logged and reflected in the summary.
pub async fn cli() -> AppResult<RunSummary> {
    let matches = command().get_matches();
    let config = resolve_config(&matches)?;
    run_workflow(&config).await
}

/// Builds the API client and runs every fetch in order.
pub async fn run_workflow(config: &Config) -> AppResult<RunSummary> {
    info!(
        api_url = %config.api_url,
        output_dir = %config.output_dir.display(),
        timeout_secs = config.request_timeout.as_secs_f64(),
        delay_secs = config.request_delay.as_secs_f64(),
        "Starting fetch"
    );

    let client = ApiClient::new(config)?;
    let summary = orchestrator::run(&client, &config.output_dir, config.request_delay).await;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parses_all_options() {
        let matches = command()
            .try_get_matches_from(vec![
                "hslu-fetch",
                "--output-dir",
                "out",
                "-c",
                "fetch.toml",
                "--env-file",
                "secrets.env",
            ])
            .unwrap();

        assert_eq!(
            matches.get_one::<PathBuf>("output_dir"),
            Some(&PathBuf::from("out"))
        );
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("fetch.toml"))
        );
        assert_eq!(
            matches.get_one::<PathBuf>("env_file"),
            Some(&PathBuf::from("secrets.env"))
        );
    }

    #[test]
    fn command_without_options_is_valid() {
        let matches = command().try_get_matches_from(vec!["hslu-fetch"]).unwrap();
        assert!(matches.get_one::<PathBuf>("output_dir").is_none());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(command()
            .try_get_matches_from(vec!["hslu-fetch", "--retries", "3"])
            .is_err());
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let matches = command()
            .try_get_matches_from(vec!["hslu-fetch", "--config", "does/not/exist.toml"])
            .unwrap();
        let err = resolve_config(&matches).unwrap_err();
        assert!(err.is_config_error());
    }
}
