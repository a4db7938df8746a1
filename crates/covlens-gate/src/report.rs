use serde_json::{Map, Value as Json, json};

use crate::Verdict;

/// `{"overallResult": "WARNING", "resultItems": [{"qualityGate", "result", "threshold", "value"}]}`.
///
/// Values are rendered in English so the document does not depend on the
/// viewer's locale.
#[must_use]
pub fn verdict_to_json(verdict: &Verdict) -> Json {
    let items: Vec<Json> = verdict
        .items
        .iter()
        .map(|item| {
            let mut entry = Map::new();
            entry.insert("qualityGate".into(), Json::String(item.name.clone()));
            entry.insert("result".into(), json!(item.status));
            entry.insert("threshold".into(), json!(item.gate.threshold));
            entry.insert("value".into(), Json::String(item.actual_text.clone()));
            Json::Object(entry)
        })
        .collect();
    json!({
        "overallResult": verdict.overall,
        "resultItems": items,
    })
}
