//! Run summary

use crate::resource::Counts;
use serde_json::{Map, Value};

/// One line per category: `"  <count> <singular>(s) enumerated"`
pub fn format_summary(counts: &Counts) -> String {
    counts
        .iter()
        .map(|(category, count)| format!("  {} {}(s) enumerated\n", count, category.def().singular))
        .collect()
}

/// Counts as a JSON object keyed by category identifier
pub fn summary_json(counts: &Counts) -> Value {
    let map: Map<String, Value> = counts
        .iter()
        .map(|(category, count)| (category.as_str().to_string(), Value::from(*count)))
        .collect();
    Value::Object(map)
}
