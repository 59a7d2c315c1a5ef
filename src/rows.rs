//! Flattening of submissions into output rows, and their ordering.

#[cfg(test)]
mod tests;

use std::borrow::Cow;

use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{RawSubmission, RawTaskEntry};

/// Fields shared by every row emitted for one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionFields {
    pub date: Option<Value>,
    pub bureau: Option<Value>,
    pub agent_id: Option<Value>,
    pub agent: Option<Value>,
    pub submission_time: Option<Value>,
    #[serde(rename = "_id")]
    pub id: Option<Value>,
    #[serde(rename = "_uuid")]
    pub uuid: Option<Value>,
    #[serde(rename = "_status")]
    pub status: Option<Value>,
}

/// Per-task fields. `Default` is the placeholder used when a submission
/// has no task entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFields {
    pub tache: Option<Value>,
    pub lien_activite: Option<Value>,
    pub code_activite: Option<Value>,
    pub resultat: Option<Value>,
    pub commentaire: Option<Value>,
    pub task_timestamp: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(flatten)]
    pub submission: SubmissionFields,
    #[serde(flatten)]
    pub task: TaskFields,
}

impl OutputRow {
    pub fn new(submission: SubmissionFields, task: TaskFields) -> Self {
        Self { submission, task }
    }

    /// `(date, bureau, agent)` with null and other empty values (`false`,
    /// `0`, `""`, `[]`, `{}`) read as empty strings.
    pub fn sort_key(&self) -> (Cow<'_, str>, Cow<'_, str>, Cow<'_, str>) {
        (
            key_text(&self.submission.date),
            key_text(&self.submission.bureau),
            key_text(&self.submission.agent),
        )
    }
}

fn key_text(value: &Option<Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Cow::Borrowed(""),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Cow::Borrowed(""),
        Some(Value::Array(a)) if a.is_empty() => Cow::Borrowed(""),
        Some(Value::Object(o)) if o.is_empty() => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

impl From<&RawSubmission> for SubmissionFields {
    fn from(raw: &RawSubmission) -> Self {
        Self {
            date: raw.date.clone(),
            bureau: raw.office.clone(),
            agent_id: raw.agent_id.clone(),
            agent: raw.agent_name.clone(),
            submission_time: raw.submission_time.clone(),
            id: raw.record_id.clone(),
            uuid: raw.record_uuid.clone(),
            status: raw.status.clone(),
        }
    }
}

impl From<RawTaskEntry> for TaskFields {
    fn from(raw: RawTaskEntry) -> Self {
        Self {
            tache: raw.task_name,
            lien_activite: raw.activity_link,
            code_activite: raw.activity_code,
            resultat: raw.result,
            commentaire: raw.comment,
            task_timestamp: raw.task_timestamp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deref, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rows(Vec<OutputRow>);

impl Rows {
    /// One row per task entry; a submission without tasks still gets one
    /// row with every task field null.
    pub fn flatten(submissions: Vec<RawSubmission>) -> Self {
        let mut rows = Vec::with_capacity(submissions.len());

        for mut sub in submissions {
            let base = SubmissionFields::from(&sub);
            let tasks = std::mem::take(&mut sub.tasks);

            if tasks.is_empty() {
                rows.push(OutputRow::new(base, TaskFields::default()));
                continue;
            }

            rows.extend(
                tasks
                    .into_iter()
                    .map(|task| OutputRow::new(base.clone(), task.into())),
            );
        }

        Self(rows)
    }

    /// Descending by `(date, bureau, agent)`. Stable, so rows sharing a key
    /// stay in emission order.
    pub fn sort_descending(&mut self) {
        self.0.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    }
}
