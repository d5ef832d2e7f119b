use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The position being simulated. Immutable for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobTitle(String);

impl JobTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named roster position bound to one model identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub key: String,
    pub model: String,
}

impl CandidateSlot {
    pub fn new(key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            model: model.into(),
        }
    }
}

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// Ordered, append-only list of exchanges for one candidate.
pub type Transcript = Vec<Exchange>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Completed,
    Failed,
}

impl CandidateStatus {
    /// Upper-case label used in reports ("COMPLETED" / "FAILED").
    pub fn label(self) -> &'static str {
        match self {
            CandidateStatus::Completed => "COMPLETED",
            CandidateStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub model: String,
    pub interview_history: Transcript,
    pub evaluation: String,
    pub status: CandidateStatus,
}

impl CandidateResult {
    pub fn completed(model: &str, interview_history: Transcript, evaluation: String) -> Self {
        Self {
            model: model.to_string(),
            interview_history,
            evaluation,
            status: CandidateStatus::Completed,
        }
    }

    pub fn failed(model: &str, reason: &str) -> Self {
        Self {
            model: model.to_string(),
            interview_history: Vec::new(),
            evaluation: format!("Interview failed due to technical issues: {reason}"),
            status: CandidateStatus::Failed,
        }
    }

    pub fn questions_answered(&self) -> usize {
        self.interview_history.len()
    }
}

/// Slot key → result, in roster order.
///
/// Serialized as a JSON object; insertion order is kept on both write and read
/// so the output file lists candidates the way the roster did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateResults(Vec<(String, CandidateResult)>);

impl CandidateResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, result: CandidateResult) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = result,
            None => self.0.push((key, result)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CandidateResult> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CandidateResult)> {
        self.0.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count_with_status(&self, status: CandidateStatus) -> usize {
        self.0.iter().filter(|(_, r)| r.status == status).count()
    }
}

impl Serialize for CandidateResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, result) in &self.0 {
            map.serialize_entry(key, result)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CandidateResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = CandidateResults;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of candidate slot keys to results")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut results = CandidateResults::new();
                while let Some((key, value)) = access.next_entry::<String, CandidateResult>()? {
                    results.insert(key, value);
                }
                Ok(results)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// The full persisted output of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub job_title: JobTitle,
    #[serde(with = "interview_date_format")]
    pub interview_date: NaiveDateTime,
    pub candidates: CandidateResults,
    pub comparative_analysis: String,
}

/// `2026-10-16 14:03:22`, second precision.
mod interview_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_result(model: &str) -> CandidateResult {
        CandidateResult::completed(
            model,
            vec![Exchange {
                question: "Why this role?".to_string(),
                answer: "I enjoy working with data.".to_string(),
            }],
            "PASS, 78/100".to_string(),
        )
    }

    #[test]
    fn test_candidate_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CandidateStatus::Completed).unwrap(),
            r#""completed""#
        );
        assert_eq!(
            serde_json::to_string(&CandidateStatus::Failed).unwrap(),
            r#""failed""#
        );
    }

    #[test]
    fn test_failed_result_has_empty_history_and_embeds_reason() {
        let result = CandidateResult::failed("groq/gemma2-9b-it", "slot misconfigured");
        assert_eq!(result.status, CandidateStatus::Failed);
        assert!(result.interview_history.is_empty());
        assert_eq!(
            result.evaluation,
            "Interview failed due to technical issues: slot misconfigured"
        );
    }

    #[test]
    fn test_candidate_results_keep_insertion_order_through_json() {
        let mut results = CandidateResults::new();
        for key in ["candidate10", "candidate2", "candidate1"] {
            results.insert(key.to_string(), sample_result("groq/llama3-8b-8192"));
        }

        let json = serde_json::to_string(&results).unwrap();
        let recovered: CandidateResults = serde_json::from_str(&json).unwrap();

        let keys: Vec<&str> = recovered.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["candidate10", "candidate2", "candidate1"]);
    }

    #[test]
    fn test_candidate_results_insert_replaces_existing_key() {
        let mut results = CandidateResults::new();
        results.insert("candidate1".to_string(), sample_result("a"));
        results.insert("candidate1".to_string(), sample_result("b"));
        assert_eq!(results.len(), 1);
        assert_eq!(results.get("candidate1").unwrap().model, "b");
    }

    #[test]
    fn test_run_result_json_shape() {
        let mut candidates = CandidateResults::new();
        candidates.insert("candidate1".to_string(), sample_result("groq/gemma2-9b-it"));
        let run = RunResult {
            job_title: JobTitle::new("Data Analyst"),
            interview_date: NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(14, 3, 22)
                .unwrap(),
            candidates,
            comparative_analysis: "Summary".to_string(),
        };

        let value = serde_json::to_value(&run).unwrap();
        assert_eq!(value["job_title"], "Data Analyst");
        assert_eq!(value["interview_date"], "2026-10-16 14:03:22");
        assert_eq!(value["candidates"]["candidate1"]["status"], "completed");
        assert_eq!(
            value["candidates"]["candidate1"]["interview_history"][0]["question"],
            "Why this role?"
        );
        assert_eq!(value["comparative_analysis"], "Summary");
    }
}
