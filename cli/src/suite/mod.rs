//! # Scenario Suites
//!
//! Each suite is a list of independent cases run against a live Petstore.
//! A failing case is recorded and the run moves on; fixtures are removed by
//! [`fixtures::Cleanup`] guards whether the case passed or not.

pub mod fixtures;
pub mod pet;
pub mod store;
pub mod user;

#[cfg(test)]
mod stub;

use crate::error::{CliError, CliResult};
use crate::report::Report;
use petstore_core::{ApiClient, ApiResponse, SchemaValidator};
use serde_json::Value;
use std::fmt::{self, Display};
use std::time::Instant;
use tracing::{error, info};

/// Selectable suites.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteName {
    /// `/pet` endpoints.
    Pet,
    /// `/store` endpoints.
    Store,
    /// `/user` endpoints.
    User,
    /// Every suite.
    All,
}

impl SuiteName {
    /// Expands `All`, drops duplicates and defaults to every suite when empty.
    pub fn expand(selected: &[SuiteName]) -> Vec<SuiteName> {
        let concrete = [SuiteName::Pet, SuiteName::Store, SuiteName::User];
        if selected.is_empty() || selected.contains(&SuiteName::All) {
            return concrete.to_vec();
        }
        concrete
            .into_iter()
            .filter(|suite| selected.contains(suite))
            .collect()
    }

    /// Cases of a concrete suite.
    pub fn cases(&self) -> &'static [Case] {
        match self {
            SuiteName::Pet => pet::CASES,
            SuiteName::Store => store::CASES,
            SuiteName::User => user::CASES,
            SuiteName::All => &[],
        }
    }

    /// Lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuiteName::Pet => "pet",
            SuiteName::Store => "store",
            SuiteName::User => "user",
            SuiteName::All => "all",
        }
    }
}

impl Display for SuiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signature of a case body.
pub type CaseFn = fn(&Context<'_>) -> CliResult<()>;

/// One named scenario.
#[derive(Clone, Copy)]
pub struct Case {
    /// Case name.
    pub name: &'static str,
    /// What the case checks.
    pub description: &'static str,
    /// Case body.
    pub run: CaseFn,
}

/// Shared state handed to every case.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// API facade.
    pub api: &'a ApiClient,
    /// Validator for explicit schema checks; `None` disables them.
    pub validator: Option<&'a SchemaValidator>,
}

impl<'a> Context<'a> {
    /// Bundles the client and optional validator.
    pub fn new(api: &'a ApiClient, validator: Option<&'a SchemaValidator>) -> Self {
        Context { api, validator }
    }

    /// Fails unless `value` satisfies the named definition.
    pub fn expect_definition(&self, value: &Value, name: &str) -> CliResult<()> {
        let Some(validator) = self.validator else {
            return Ok(());
        };
        match validator.validate_definition(value, name)?.message() {
            None => Ok(()),
            Some(message) => fail(format!("{} schema validation failed: {}", name, message)),
        }
    }

    /// Fails unless `value` violates the named definition with a message mentioning `field`.
    pub fn expect_definition_violation(&self, value: &Value, name: &str, field: &str) -> CliResult<()> {
        let Some(validator) = self.validator else {
            return Ok(());
        };
        match validator.validate_definition(value, name)?.message() {
            None => fail(format!("payload unexpectedly satisfies {}", name)),
            Some(message) if message.to_lowercase().contains(&field.to_lowercase()) => Ok(()),
            Some(message) => fail(format!("error should mention '{}': {}", field, message)),
        }
    }

    /// Fails unless `value` satisfies the documented response schema.
    pub fn expect_response_schema(
        &self,
        value: &Value,
        path: &str,
        method: &str,
        status: u16,
    ) -> CliResult<()> {
        let Some(validator) = self.validator else {
            return Ok(());
        };
        match validator.validate_response(value, path, method, status)?.message() {
            None => Ok(()),
            Some(message) => fail(format!("response schema validation failed: {}", message)),
        }
    }
}

/// Shorthand for an assertion failure.
pub fn fail<T>(message: impl Into<String>) -> CliResult<T> {
    Err(CliError::Assertion(message.into()))
}

/// Fails with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> CliResult<()> {
    if condition {
        Ok(())
    } else {
        fail(message())
    }
}

/// Fails unless the status is one of `expected`.
pub fn expect_status(response: &ApiResponse, expected: &[u16]) -> CliResult<()> {
    ensure(expected.contains(&response.status), || {
        format!(
            "expected status {:?}, got {}: {}",
            expected, response.status, response.body
        )
    })
}

/// Fails when the client recorded a schema mismatch for the response.
pub fn expect_documented_shape(response: &ApiResponse) -> CliResult<()> {
    match &response.schema_error {
        None => Ok(()),
        Some(message) => fail(format!("response does not match documented schema: {}", message)),
    }
}

/// Runs every case of `suites`, recording each outcome.
pub fn run_suites(ctx: &Context<'_>, suites: &[SuiteName], report: &mut Report) {
    for suite in suites {
        info!("=== Suite: {} ===", suite);
        for case in suite.cases() {
            run_case(ctx, *suite, case, report);
        }
    }
}

fn run_case(ctx: &Context<'_>, suite: SuiteName, case: &Case, report: &mut Report) {
    info!("--- {}::{} ---", suite, case.name);
    info!("{}", case.description);
    let started = Instant::now();
    let failure = match (case.run)(ctx) {
        Ok(()) => {
            info!("PASSED {}::{}", suite, case.name);
            None
        }
        Err(e) => {
            error!("FAILED {}::{}: {}", suite, case.name, e);
            Some(e.to_string())
        }
    };
    report.record(
        suite.as_str(),
        case.name,
        case.description,
        started.elapsed(),
        failure,
    );
}
