// Prompt templates and builders for the interview flow.
// Builders are pure: identical inputs always produce identical text.

use crate::interview::models::{CandidateResults, CandidateSlot, Exchange, JobTitle};
use crate::llm_client::prompts::{PLAIN_TEXT_INSTRUCTION, SINGLE_ITEM_INSTRUCTION};

/// Question prompt. Replace: {question_number}, {job_title}, {direction}, {context},
/// {single_item_instruction}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are conducting interview question #{question_number} for the {job_title} position.

Previous conversation context:
{context}

{direction}

Generate a single clear, focused question that helps evaluate the candidate.
{single_item_instruction}"#;

const FIRST_QUESTION_DIRECTION: &str = "This is the first question. Ask about the candidate's \
    motivation for this role and their background.";

const FOLLOW_UP_DIRECTION: &str = "This is a follow-up question. Analyze the candidate's previous \
    answers above and ask a question that builds directly on something they said, digging deeper \
    into their potential, soft skills, and cultural fit.";

/// Shown in the question prompt before any exchange exists.
pub const NO_PREVIOUS_RESPONSES: &str = "No previous responses";

/// Answer prompt. Replace: {question}, {single_item_instruction}
pub const ANSWER_PROMPT_TEMPLATE: &str = r#"You are answering this interview question: '{question}'

Provide a thoughtful, honest response that:
- Demonstrates your enthusiasm and potential
- Draws from your academic experiences when relevant
- Shows your willingness to learn and grow
- Maintains professionalism while being authentic

{single_item_instruction}"#;

/// Evaluation prompt. Replace: {context}, {job_title}, {plain_text_instruction}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Based on the full interview conversation:

{context}

Provide a comprehensive evaluation of the candidate for the {job_title} position.
Include:
1. Overall Decision (PASS/FAIL)
2. Score (0-100)
3. Key Strengths Demonstrated
4. Areas for Improvement
5. Specific Tips for Future Interviews
6. Detailed Reasoning for the Decision

Format the response clearly with headers and bullet points.
{plain_text_instruction}"#;

/// Comparative analysis prompt. Replace: {job_title}, {count}, {assignments},
/// {candidates}, {plain_text_instruction}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Write a detailed comparative analysis report for the {job_title} position interviews.

You conducted {count} interviews with different AI models.

Model assignments:
{assignments}

Interview outcomes:
{candidates}

Write a complete analysis including:

=== INTERVIEW SUMMARY ===
- Total candidates interviewed
- Interview completion status

=== MODEL COMPARISON ===
- Performance differences between models
- Response quality observations
- Communication style variations

=== RECOMMENDATIONS ===
- Best performing models
- Suggestions for improvement
- Future interview optimization

Write the full analysis now. Do not just think about it.
{plain_text_instruction}"#;

/// Renders a transcript as `Q1: ...\nA1: ...` lines.
fn render_transcript(transcript: &[Exchange]) -> String {
    transcript
        .iter()
        .enumerate()
        .map(|(i, exchange)| {
            format!(
                "Q{n}: {q}\nA{n}: {a}",
                n = i + 1,
                q = exchange.question,
                a = exchange.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the prompt for question `question_number` (1-based).
pub fn question_prompt(job_title: &JobTitle, question_number: usize, transcript: &[Exchange]) -> String {
    let (direction, context) = if question_number <= 1 || transcript.is_empty() {
        (FIRST_QUESTION_DIRECTION, NO_PREVIOUS_RESPONSES.to_string())
    } else {
        (FOLLOW_UP_DIRECTION, render_transcript(transcript))
    };

    QUESTION_PROMPT_TEMPLATE
        .replace("{single_item_instruction}", SINGLE_ITEM_INSTRUCTION)
        .replace("{direction}", direction)
        .replace("{question_number}", &question_number.to_string())
        .replace("{job_title}", job_title.as_str())
        .replace("{context}", &context)
}

pub fn answer_prompt(question: &str) -> String {
    ANSWER_PROMPT_TEMPLATE
        .replace("{single_item_instruction}", SINGLE_ITEM_INSTRUCTION)
        .replace("{question}", question)
}

/// Builds the evaluation prompt. Must only be called with the complete transcript.
pub fn evaluation_prompt(job_title: &JobTitle, transcript: &[Exchange]) -> String {
    EVALUATION_PROMPT_TEMPLATE
        .replace("{plain_text_instruction}", PLAIN_TEXT_INSTRUCTION)
        .replace("{job_title}", job_title.as_str())
        .replace("{context}", &render_transcript(transcript))
}

pub fn analysis_prompt(
    job_title: &JobTitle,
    results: &CandidateResults,
    roster: &[CandidateSlot],
) -> String {
    let assignments = roster
        .iter()
        .map(|slot| format!("- {}: {}", slot.key, slot.model))
        .collect::<Vec<_>>()
        .join("\n");

    let candidates = results
        .iter()
        .map(|(key, result)| {
            format!(
                "- {key} ({model}): {status}, {answered} questions answered\n  Evaluation: {evaluation}",
                model = result.model,
                status = result.status.label(),
                answered = result.questions_answered(),
                evaluation = result.evaluation.replace('\n', "\n  "),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    ANALYSIS_PROMPT_TEMPLATE
        .replace("{plain_text_instruction}", PLAIN_TEXT_INSTRUCTION)
        .replace("{job_title}", job_title.as_str())
        .replace("{count}", &results.len().to_string())
        .replace("{assignments}", &assignments)
        .replace("{candidates}", &candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::CandidateResult;

    fn exchange(q: &str, a: &str) -> Exchange {
        Exchange {
            question: q.to_string(),
            answer: a.to_string(),
        }
    }

    #[test]
    fn test_first_question_asks_about_motivation() {
        let prompt = question_prompt(&JobTitle::new("Data Analyst"), 1, &[]);
        assert!(prompt.contains("question #1 for the Data Analyst position"));
        assert!(prompt.contains(NO_PREVIOUS_RESPONSES));
        assert!(prompt.contains("motivation"));
        assert!(!prompt.contains("{"), "unfilled placeholder in: {prompt}");
    }

    #[test]
    fn test_follow_up_question_includes_prior_answers() {
        let transcript = vec![exchange("Why data?", "I love statistics.")];
        let prompt = question_prompt(&JobTitle::new("Data Analyst"), 2, &transcript);
        assert!(prompt.contains("Q1: Why data?\nA1: I love statistics."));
        assert!(prompt.contains("builds directly on something they said"));
        assert!(!prompt.contains(NO_PREVIOUS_RESPONSES));
    }

    #[test]
    fn test_answer_prompt_quotes_question() {
        let prompt = answer_prompt("What motivates you?");
        assert!(prompt.contains("'What motivates you?'"));
        assert!(prompt.contains("academic experiences"));
    }

    #[test]
    fn test_evaluation_prompt_sees_every_exchange() {
        let transcript = vec![
            exchange("Q one", "A one"),
            exchange("Q two", "A two"),
            exchange("Q three", "A three"),
        ];
        let prompt = evaluation_prompt(&JobTitle::new("AI Engineer"), &transcript);
        assert!(prompt.contains("Q3: Q three\nA3: A three"));
        assert!(prompt.contains("Overall Decision (PASS/FAIL)"));
        assert!(prompt.contains("Score (0-100)"));
    }

    #[test]
    fn test_analysis_prompt_names_models_and_statuses() {
        let mut results = CandidateResults::new();
        results.insert(
            "candidate1".to_string(),
            CandidateResult::completed("groq/gemma2-9b-it", vec![exchange("q", "a")], "PASS".to_string()),
        );
        results.insert(
            "candidate2".to_string(),
            CandidateResult::failed("groq/llama3-8b-8192", "boom"),
        );
        let roster = vec![
            CandidateSlot::new("candidate1", "groq/gemma2-9b-it"),
            CandidateSlot::new("candidate2", "groq/llama3-8b-8192"),
        ];

        let prompt = analysis_prompt(&JobTitle::new("Product Manager"), &results, &roster);
        assert!(prompt.contains("You conducted 2 interviews"));
        assert!(prompt.contains("- candidate1: groq/gemma2-9b-it"));
        assert!(prompt.contains("candidate2 (groq/llama3-8b-8192): FAILED, 0 questions answered"));
        assert!(prompt.contains("=== RECOMMENDATIONS ==="));
    }

    #[test]
    fn test_builders_are_deterministic() {
        let job = JobTitle::new("Content Creator");
        let transcript = vec![exchange("Why content?", "I write a blog.")];

        assert_eq!(
            question_prompt(&job, 2, &transcript),
            question_prompt(&job, 2, &transcript)
        );
        assert_eq!(answer_prompt("Why?"), answer_prompt("Why?"));
        assert_eq!(
            evaluation_prompt(&job, &transcript),
            evaluation_prompt(&job, &transcript)
        );
        let results = CandidateResults::new();
        assert_eq!(
            analysis_prompt(&job, &results, &[]),
            analysis_prompt(&job, &results, &[])
        );
    }
}
