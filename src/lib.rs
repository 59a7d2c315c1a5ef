//! Refreshes the task table of the Kobo field-activity dashboard: fetch the
//! form submissions, flatten the repeated task group, sort, write JSON.

pub mod config;
pub mod data;
pub mod error;
pub mod fetch;
pub mod output;
pub mod rows;
pub mod summary;

use chrono::Utc;
use tracing::info;

use crate::config::Config;
use crate::data::{RawPayload, RawSubmission};
use crate::error::RefreshResult;
use crate::fetch::KoboClient;
use crate::rows::Rows;
use crate::summary::RunSummary;

/// Flattens and sorts the submissions of a payload.
pub fn build_rows(results: Vec<RawSubmission>) -> Rows {
    let mut rows = Rows::flatten(results);
    rows.sort_descending();
    rows
}

/// Everything after the fetch: transform, write, summarize.
pub fn process(payload: RawPayload, config: &Config) -> RefreshResult<RunSummary> {
    let RawPayload { count, results } = payload;
    info!(submissions = results.len(), "flattening");

    let rows = build_rows(results);
    output::write_rows(&config.output, &rows)?;

    let summary = RunSummary::new(&rows, count, Utc::now());
    info!(
        path = %config.output.display(),
        rows = summary.rows,
        agents = summary.agents,
        in_progress = summary.in_progress,
        finished = summary.finished,
        "data refreshed"
    );
    Ok(summary)
}

pub fn run(config: &Config) -> RefreshResult<RunSummary> {
    let payload = KoboClient::new(config)?.fetch()?;
    process(payload, config)
}
