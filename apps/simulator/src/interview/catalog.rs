//! Fixed job titles, known model identifiers, and the default roster.

use tracing::warn;

use crate::interview::models::{CandidateSlot, JobTitle};

pub const JOB_TITLES: &[&str] = &[
    "Marketing Associate",
    "Business Development Representative",
    "Product Manager",
    "Customer Success Representative",
    "Data Analyst",
    "Content Creator",
    "AI Engineer",
];

/// Used when an interactive choice cannot be resolved.
pub const DEFAULT_JOB_TITLE: &str = "Content Creator";

pub const AVAILABLE_MODELS: &[&str] = &[
    "groq/llama-3.1-8b-instant",
    "groq/llama3-8b-8192",
    "groq/gemma2-9b-it",
    "groq/mixtral-8x7b-32768",
    "groq/llama-3.1-70b-versatile",
];

pub const DEFAULT_INTERVIEWER_MODEL: &str = "groq/llama-3.1-8b-instant";

pub const DEFAULT_NUM_QUESTIONS: usize = 3;

/// Four slots; `candidate1` and `candidate4` share a model for a direct comparison.
pub fn default_roster() -> Vec<CandidateSlot> {
    vec![
        CandidateSlot::new("candidate1", "groq/llama-3.1-8b-instant"),
        CandidateSlot::new("candidate2", "groq/llama3-8b-8192"),
        CandidateSlot::new("candidate3", "groq/gemma2-9b-it"),
        CandidateSlot::new("candidate4", "groq/llama-3.1-8b-instant"),
    ]
}

/// Resolves a menu choice to a job title.
///
/// A 1-based index selects from `JOB_TITLES` and a name matches case-insensitively.
/// Anything else falls back to `DEFAULT_JOB_TITLE`.
pub fn resolve_job_title(choice: &str) -> JobTitle {
    let choice = choice.trim();
    if choice.is_empty() {
        return JobTitle::new(DEFAULT_JOB_TITLE);
    }

    match find_listed_title(choice) {
        Some(title) => JobTitle::new(title),
        None => {
            warn!("Invalid job choice '{choice}'. Using default: {DEFAULT_JOB_TITLE}");
            JobTitle::new(DEFAULT_JOB_TITLE)
        }
    }
}

/// Like `resolve_job_title`, but non-numeric text outside the list is kept as
/// a caller-supplied title. Used for the `--job` flag.
pub fn resolve_job_flag(choice: &str) -> JobTitle {
    let trimmed = choice.trim();
    if trimmed.is_empty() || trimmed.parse::<usize>().is_ok() || find_listed_title(trimmed).is_some()
    {
        return resolve_job_title(trimmed);
    }
    JobTitle::new(trimmed)
}

fn find_listed_title(choice: &str) -> Option<&'static str> {
    if let Ok(index) = choice.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| JOB_TITLES.get(i)).copied();
    }
    JOB_TITLES
        .iter()
        .find(|title| title.eq_ignore_ascii_case(choice))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_job_title_by_index() {
        assert_eq!(resolve_job_title("5").as_str(), "Data Analyst");
        assert_eq!(resolve_job_title(" 1 ").as_str(), "Marketing Associate");
    }

    #[test]
    fn test_resolve_job_title_out_of_range_uses_default() {
        assert_eq!(resolve_job_title("0").as_str(), DEFAULT_JOB_TITLE);
        assert_eq!(resolve_job_title("8").as_str(), DEFAULT_JOB_TITLE);
        assert_eq!(resolve_job_title("").as_str(), DEFAULT_JOB_TITLE);
    }

    #[test]
    fn test_resolve_job_title_by_name_is_case_insensitive() {
        assert_eq!(resolve_job_title("ai engineer").as_str(), "AI Engineer");
    }

    #[test]
    fn test_resolve_job_title_unknown_name_uses_default() {
        assert_eq!(resolve_job_title("Site Reliability Engineer").as_str(), DEFAULT_JOB_TITLE);
        assert_eq!(resolve_job_title("seven").as_str(), DEFAULT_JOB_TITLE);
    }

    #[test]
    fn test_resolve_job_flag_keeps_custom_title() {
        assert_eq!(resolve_job_flag(" Site Reliability Engineer ").as_str(), "Site Reliability Engineer");
        assert_eq!(resolve_job_flag("2").as_str(), JOB_TITLES[1]);
        assert_eq!(resolve_job_flag("9").as_str(), DEFAULT_JOB_TITLE);
        assert_eq!(resolve_job_flag("data analyst").as_str(), "Data Analyst");
    }

    #[test]
    fn test_default_roster_has_duplicate_model_pair() {
        let roster = default_roster();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0].model, roster[3].model);
        assert!(roster.iter().all(|slot| AVAILABLE_MODELS.contains(&slot.model.as_str())));
    }
}
