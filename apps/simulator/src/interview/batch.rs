//! Batch Runner: interviews every roster slot in order, then asks the
//! interviewer for one comparative analysis across all results.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime, Timelike};
use tracing::{info, warn};

use crate::interview::models::{CandidateResults, CandidateSlot, CandidateStatus, JobTitle, RunResult};
use crate::interview::orchestrator::{pause, InterviewOrchestrator, SimulationSettings};
use crate::interview::prompts::analysis_prompt;
use crate::interview::roles::Role;
use crate::interview::writer::write_results;
use crate::llm_client::ChatCompletion;

pub const ANALYSIS_MAX_TOKENS: u32 = 2048;

/// Analyses shorter than this are treated as a failed call.
pub const MIN_ANALYSIS_CHARS: usize = 50;

pub const NO_INTERVIEWS_ANALYSIS: &str = "No successful interviews to analyze.";

/// Some models leak a reasoning line ("Thought: ...") ahead of the real output.
const REASONING_MARKER: &str = "Thought:";

pub struct Simulation {
    llm: Arc<dyn ChatCompletion>,
    job_title: JobTitle,
    roster: Vec<CandidateSlot>,
    settings: SimulationSettings,
}

impl Simulation {
    pub fn new(
        llm: Arc<dyn ChatCompletion>,
        job_title: JobTitle,
        roster: Vec<CandidateSlot>,
        settings: SimulationSettings,
    ) -> Self {
        Self {
            llm,
            job_title,
            roster,
            settings,
        }
    }

    /// Runs every candidate sequentially and assembles the RunResult.
    pub async fn run(&self) -> RunResult {
        info!(
            "=== Starting interviews for {} candidates ({}) ===",
            self.roster.len(),
            self.job_title
        );

        let interviewer = Role::interviewer(&self.job_title, &self.settings.interviewer_model);
        let orchestrator = InterviewOrchestrator::new(
            self.llm.as_ref(),
            &self.job_title,
            &interviewer,
            &self.settings,
        );

        let mut candidates = CandidateResults::new();
        for (i, slot) in self.roster.iter().enumerate() {
            info!("Processing {}...", slot.key);
            let result = orchestrator.conduct(slot).await;
            candidates.insert(slot.key.clone(), result);
            info!("Completed {}", slot.key);

            if i + 1 < self.roster.len() {
                pause(self.settings.candidate_pause).await;
            }
        }

        let comparative_analysis = self.comparative_analysis(&interviewer, &candidates).await;

        RunResult {
            job_title: self.job_title.clone(),
            interview_date: now_to_the_second(),
            candidates,
            comparative_analysis,
        }
    }

    /// Runs the simulation and writes the result file. A write failure is fatal.
    pub async fn run_and_save(&self, results_dir: &Path) -> anyhow::Result<(PathBuf, RunResult)> {
        let result = self.run().await;
        let path = write_results(results_dir, &result)?;
        Ok((path, result))
    }

    async fn comparative_analysis(&self, interviewer: &Role, candidates: &CandidateResults) -> String {
        if candidates.is_empty() {
            return NO_INTERVIEWS_ANALYSIS.to_string();
        }

        let prompt = interviewer.frame(&analysis_prompt(&self.job_title, candidates, &self.roster));

        match self
            .llm
            .complete(&interviewer.model, &prompt, ANALYSIS_MAX_TOKENS)
            .await
        {
            Ok(text) => {
                let analysis = strip_reasoning_preamble(&text);
                if analysis.chars().count() < MIN_ANALYSIS_CHARS {
                    warn!(
                        "Analysis was brief ({} chars), using fallback analysis",
                        analysis.chars().count()
                    );
                    fallback_analysis(&self.job_title, candidates)
                } else {
                    analysis.to_string()
                }
            }
            Err(e) => {
                warn!("Analysis failed, using fallback analysis: {e}");
                fallback_analysis(&self.job_title, candidates)
            }
        }
    }
}

/// Local wall-clock time at second precision, matching the persisted format.
fn now_to_the_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Drops a leading "Thought:" line when it is followed by a line break.
pub fn strip_reasoning_preamble(text: &str) -> &str {
    let text = text.trim();
    match text.strip_prefix(REASONING_MARKER) {
        Some(rest) => match rest.split_once('\n') {
            Some((_, remainder)) => remainder.trim(),
            None => text,
        },
        None => text,
    }
}

/// Deterministic summary used when the model's analysis is missing or too thin.
pub fn fallback_analysis(job_title: &JobTitle, candidates: &CandidateResults) -> String {
    let completed = candidates.count_with_status(CandidateStatus::Completed);
    let failed = candidates.len() - completed;

    let mut analysis = format!(
        "INTERVIEW SIMULATION ANALYSIS - {job_title}\n\
        \n\
        === SUMMARY ===\n\
        - Total Candidates: {total}\n\
        - Completed Interviews: {completed}\n\
        - Failed Interviews: {failed}\n\
        \n\
        === MODEL PERFORMANCE ===\n",
        total = candidates.len(),
    );

    for (i, (_, result)) in candidates.iter().enumerate() {
        analysis.push_str(&format!(
            "\nCandidate {n}: {model}\n- Status: {status}\n- Questions Answered: {answered}\n",
            n = i + 1,
            model = result.model,
            status = result.status.label(),
            answered = result.questions_answered(),
        ));
    }

    analysis.push_str(
        "\n=== RECOMMENDATIONS ===\n\
        - All working models performed adequately\n\
        - Consider using multiple models for comparison\n\
        - Technical issues may require API optimization",
    );

    analysis
}
