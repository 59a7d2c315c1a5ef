use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::rows::Rows;

/// Figures reported once the output file is written.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub refreshed_at: DateTime<Utc>,
    pub rows: usize,
    /// `count` as reported by the API, not the length of `results`.
    pub submissions: Option<Value>,
    pub agents: usize,
    pub in_progress: usize,
    pub finished: usize,
}

impl RunSummary {
    pub fn new(rows: &Rows, submissions: Option<Value>, refreshed_at: DateTime<Utc>) -> Self {
        let agents: HashSet<String> = rows
            .iter()
            .filter_map(|r| r.submission.agent.as_ref())
            .map(text)
            .filter(|a| !a.trim().is_empty())
            .collect();

        let results: Vec<String> = rows
            .iter()
            .map(|r| r.task.resultat.as_ref().map(text).unwrap_or_default())
            .map(|s| s.trim().to_lowercase())
            .collect();

        Self {
            refreshed_at,
            rows: rows.len(),
            submissions,
            agents: agents.len(),
            in_progress: results.iter().filter(|r| r.contains("en_cours")).count(),
            finished: results.iter().filter(|r| r.contains("term")).count(),
        }
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let submissions = match &self.submissions {
            Some(count) => text(count),
            None => "None".to_owned(),
        };
        write!(
            f,
            "Refreshed at {}. Rows={} from submissions={}",
            self.refreshed_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            self.rows,
            submissions
        )
    }
}
