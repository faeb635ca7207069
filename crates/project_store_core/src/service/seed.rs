//! Sample projects written into an empty store at first start.

use crate::model::project::ProjectPayload;
use serde_json::{json, Value};

/// Number of records produced by [`sample_payloads`].
pub const SAMPLE_PROJECT_COUNT: usize = 3;

/// Create payloads for the fixed sample collection, in insertion order.
pub fn sample_payloads() -> Vec<ProjectPayload> {
    [
        json!({
            "name": "Metro Line 4 Extension",
            "industry": "Public Transit",
            "investmentScore": 82.0,
            "transportScore": 91.0,
            "status": "Recommended",
        }),
        json!({
            "name": "Electric Bus Depot Conversion",
            "industry": "Urban Mobility",
            "investmentScore": 74.0,
            "transportScore": 68.0,
            "status": "Under Review",
        }),
        json!({
            "name": "Regional Freight Rail Link",
            "industry": "Logistics",
            "investmentScore": 55.0,
            "transportScore": 47.0,
            "status": "Not Recommended",
        }),
    ]
    .into_iter()
    .filter_map(|value| match value {
        Value::Object(fields) => Some(fields),
        _ => None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{sample_payloads, SAMPLE_PROJECT_COUNT};
    use std::collections::HashSet;

    #[test]
    fn samples_are_complete_and_distinct() {
        let samples = sample_payloads();
        assert_eq!(samples.len(), SAMPLE_PROJECT_COUNT);

        let names: HashSet<_> = samples
            .iter()
            .map(|sample| sample["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names.len(), SAMPLE_PROJECT_COUNT);
        for sample in &samples {
            for key in ["industry", "investmentScore", "transportScore", "status"] {
                assert!(sample.contains_key(key), "sample missing {key}");
            }
        }
    }
}
