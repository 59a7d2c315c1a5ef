//! Raw shapes of the Kobo `data.json` payload.
//!
//! Every field is optional: a missing key and an explicit `null` both
//! deserialize to `None`, so malformed submissions never fail the run.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub count: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<RawSubmission>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSubmission {
    #[serde(rename = "grp_main/date_jour", default)]
    pub date: Option<Value>,
    #[serde(rename = "grp_main/bureau", default)]
    pub office: Option<Value>,
    #[serde(rename = "grp_main/agent_id", default)]
    pub agent_id: Option<Value>,
    #[serde(rename = "grp_main/agent", default)]
    pub agent_name: Option<Value>,
    #[serde(rename = "_submission_time", default)]
    pub submission_time: Option<Value>,
    #[serde(rename = "_id", default)]
    pub record_id: Option<Value>,
    #[serde(rename = "_uuid", default)]
    pub record_uuid: Option<Value>,
    #[serde(rename = "_status", default)]
    pub status: Option<Value>,
    #[serde(rename = "grp_main/rep_taches", default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<RawTaskEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTaskEntry {
    #[serde(rename = "grp_main/rep_taches/tache", default)]
    pub task_name: Option<Value>,
    #[serde(rename = "grp_main/rep_taches/lien_activite", default)]
    pub activity_link: Option<Value>,
    #[serde(rename = "grp_main/rep_taches/code_activite", default)]
    pub activity_code: Option<Value>,
    #[serde(rename = "grp_main/rep_taches/resultat", default)]
    pub result: Option<Value>,
    #[serde(rename = "grp_main/rep_taches/commentaire", default)]
    pub comment: Option<Value>,
    #[serde(rename = "grp_main/rep_taches/timestamp", default)]
    pub task_timestamp: Option<Value>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
