//! Interview Orchestrator: runs one candidate's interview end to end.
//!
//! Flow per candidate:
//!   question(i) → answer(i) → … → evaluation → completed result
//!
//! Each remote call owns its own fallback text, so a failed question or answer
//! never aborts the loop. Anything that escapes the whole flow is caught once in
//! `conduct()` and turned into a failed result with an empty transcript.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::interview::catalog::{DEFAULT_INTERVIEWER_MODEL, DEFAULT_NUM_QUESTIONS};
use crate::interview::models::{CandidateResult, CandidateSlot, Exchange, JobTitle, Transcript};
use crate::interview::prompts::{answer_prompt, evaluation_prompt, question_prompt};
use crate::interview::roles::Role;
use crate::llm_client::ChatCompletion;

pub const QUESTION_MAX_TOKENS: u32 = 256;
pub const ANSWER_MAX_TOKENS: u32 = 512;
pub const EVALUATION_MAX_TOKENS: u32 = 1024;

pub const FALLBACK_ANSWER: &str = "I have academic experience and strong motivation to learn.";

pub fn fallback_question(job_title: &JobTitle) -> String {
    format!("Tell me about your experience relevant to {job_title}?")
}

pub fn fallback_evaluation(model: &str) -> String {
    format!("Evaluation failed for {model} due to technical issues.")
}

/// Run-wide knobs shared by the orchestrator and the batch runner.
///
/// The pauses are rate-limit courtesy only; tests set them to zero.
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub interviewer_model: String,
    pub num_questions: usize,
    /// Between receiving a question and requesting its answer.
    pub question_pause: Duration,
    /// After each answer.
    pub answer_pause: Duration,
    /// Between candidates.
    pub candidate_pause: Duration,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            interviewer_model: DEFAULT_INTERVIEWER_MODEL.to_string(),
            num_questions: DEFAULT_NUM_QUESTIONS,
            question_pause: Duration::from_secs(2),
            answer_pause: Duration::from_secs(1),
            candidate_pause: Duration::from_secs(3),
        }
    }
}

impl SimulationSettings {
    pub fn without_pauses(self) -> Self {
        Self {
            question_pause: Duration::ZERO,
            answer_pause: Duration::ZERO,
            candidate_pause: Duration::ZERO,
            ..self
        }
    }
}

/// Faults that abort a whole candidate rather than a single step.
#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("candidate slot key must not be empty")]
    MissingSlotKey,

    #[error("candidate slot '{0}' has no model identifier")]
    MissingModel(String),
}

pub async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

pub struct InterviewOrchestrator<'a> {
    llm: &'a dyn ChatCompletion,
    job_title: &'a JobTitle,
    interviewer: &'a Role,
    settings: &'a SimulationSettings,
}

impl<'a> InterviewOrchestrator<'a> {
    pub fn new(
        llm: &'a dyn ChatCompletion,
        job_title: &'a JobTitle,
        interviewer: &'a Role,
        settings: &'a SimulationSettings,
    ) -> Self {
        Self {
            llm,
            job_title,
            interviewer,
            settings,
        }
    }

    /// Runs one candidate's interview. Always yields exactly one result.
    pub async fn conduct(&self, slot: &CandidateSlot) -> CandidateResult {
        info!(
            "=== Starting interview for {} using {} ===",
            slot.key, slot.model
        );

        match self.try_conduct(slot).await {
            Ok(result) => {
                debug!("{}: completed", slot.key);
                result
            }
            Err(e) => {
                error!("Complete interview failed for {}: {e}", slot.key);
                debug!("{}: failed", slot.key);
                CandidateResult::failed(&slot.model, &e.to_string())
            }
        }
    }

    async fn try_conduct(&self, slot: &CandidateSlot) -> Result<CandidateResult, InterviewError> {
        let candidate = self.candidate_role(slot)?;
        let mut transcript: Transcript = Vec::with_capacity(self.settings.num_questions);

        for i in 1..=self.settings.num_questions {
            debug!("{}: asking question {i}", slot.key);
            let question = self.ask_question(i, &transcript).await;
            info!("{}: {question}", self.interviewer.name);

            pause(self.settings.question_pause).await;

            debug!("{}: awaiting answer {i}", slot.key);
            let answer = self.answer_question(&candidate, &question).await;
            info!("{}: {answer}", candidate.name);

            pause(self.settings.answer_pause).await;

            transcript.push(Exchange { question, answer });
        }

        debug!("{}: evaluating", slot.key);
        let evaluation = self.evaluate(&transcript, &slot.model).await;

        Ok(CandidateResult::completed(&slot.model, transcript, evaluation))
    }

    fn candidate_role(&self, slot: &CandidateSlot) -> Result<Role, InterviewError> {
        if slot.key.trim().is_empty() {
            return Err(InterviewError::MissingSlotKey);
        }
        if slot.model.trim().is_empty() {
            return Err(InterviewError::MissingModel(slot.key.clone()));
        }
        Ok(Role::candidate(self.job_title, &slot.model))
    }

    async fn ask_question(&self, question_number: usize, transcript: &[Exchange]) -> String {
        let prompt = self
            .interviewer
            .frame(&question_prompt(self.job_title, question_number, transcript));

        match self
            .llm
            .complete(&self.interviewer.model, &prompt, QUESTION_MAX_TOKENS)
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Question {question_number} generation failed, using fallback: {e}");
                fallback_question(self.job_title)
            }
        }
    }

    async fn answer_question(&self, candidate: &Role, question: &str) -> String {
        let prompt = candidate.frame(&answer_prompt(question));

        match self
            .llm
            .complete(&candidate.model, &prompt, ANSWER_MAX_TOKENS)
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Answer generation failed for {}, using fallback: {e}", candidate.model);
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    async fn evaluate(&self, transcript: &[Exchange], model: &str) -> String {
        let prompt = self
            .interviewer
            .frame(&evaluation_prompt(self.job_title, transcript));

        match self
            .llm
            .complete(&self.interviewer.model, &prompt, EVALUATION_MAX_TOKENS)
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Evaluation failed for {model}, using fallback: {e}");
                fallback_evaluation(model)
            }
        }
    }
}
