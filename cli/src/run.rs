//! # Run Command
//!
//! Executes the scenario suites against a live Petstore and writes a report.

use crate::error::CliResult;
use crate::logging;
use crate::report::Report;
use crate::suite::{self, Context, SuiteName};
use chrono::Local;
use petstore_core::config::DEFAULT_ENV_DIR;
use petstore_core::{ApiClient, ApiDocument, SchemaValidator, Settings, SettingsOverrides};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const BANNER: &str = "============================================================";

/// Arguments for the run command.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Environment to run against (dev, staging, prod).
    #[clap(long, default_value = "dev")]
    pub env: String,

    /// Override the base URL.
    #[clap(long)]
    pub base_url: Option<String>,

    /// Override the API key.
    #[clap(long)]
    pub api_key: Option<String>,

    /// Directory holding `<env>.env` files.
    #[clap(long, default_value = DEFAULT_ENV_DIR)]
    pub env_dir: PathBuf,

    /// Swagger/OpenAPI description to validate against (defaults to the bundled Petstore).
    #[clap(long)]
    pub swagger: Option<PathBuf>,

    /// Suites to run; repeat to select several. Runs all when omitted.
    #[clap(long = "suite", value_enum)]
    pub suites: Vec<SuiteName>,

    /// Directory for JSON reports.
    #[clap(long, default_value = "reports")]
    pub report_dir: PathBuf,

    /// Directory for session logs.
    #[clap(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Skip response schema validation.
    #[clap(long)]
    pub no_schema_validation: bool,
}

impl RunArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

/// Executes the run. Returns `Ok(false)` when at least one case failed.
pub fn execute(args: &RunArgs) -> CliResult<bool> {
    let settings = Settings::load(&args.env, &args.env_dir)?.with_overrides(&args.overrides());
    let log_file = logging::init(&settings.log_level, &args.log_dir)?;

    info!("{}", BANNER);
    info!("TEST SESSION STARTED: {}", Local::now().to_rfc3339());
    info!("Environment: {}", settings.env_name);
    info!("Base URL: {}", settings.base_url);
    info!("Log file: {:?}", log_file);
    info!("{}", BANNER);

    let document = match &args.swagger {
        Some(path) => ApiDocument::from_path(path)?,
        None => ApiDocument::petstore()?,
    };
    let validator = Arc::new(SchemaValidator::new(document));
    let validate = !args.no_schema_validation;

    let api = ApiClient::from_settings(&settings, validate.then(|| Arc::clone(&validator)));
    let ctx = Context::new(&api, validate.then_some(validator.as_ref()));

    let mut report = Report::start(&settings);
    suite::run_suites(&ctx, &SuiteName::expand(&args.suites), &mut report);
    report.finish();
    let report_path = report.write(&args.report_dir)?;

    info!("{}", BANNER);
    info!(
        "Results: {} passed, {} failed, {} total",
        report.totals.passed, report.totals.failed, report.totals.total
    );
    info!("Report written to {:?}", report_path);
    info!("TEST SESSION ENDED: {}", Local::now().to_rfc3339());
    info!("{}", BANNER);

    Ok(report.is_success())
}
