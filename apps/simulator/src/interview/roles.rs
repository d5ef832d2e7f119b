//! Interviewer and candidate personas. Plain data: both roles use the same
//! request shape, so the persona is just text prepended to each task prompt.

use crate::interview::models::JobTitle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: &'static str,
    pub instructions: String,
    pub model: String,
}

impl Role {
    pub fn interviewer(job_title: &JobTitle, model: &str) -> Self {
        Self {
            name: "Co-founder",
            instructions: format!(
                "ROLE: You are a startup co-founder interviewing candidates for the {job_title} position.\n\
                GOAL: Identify candidates with strong potential, communication skills, and cultural fit.\n\
                BACKGROUND: You have hired dozens of early-career people and value curiosity \
                and eagerness to learn over years of experience."
            ),
            model: model.to_string(),
        }
    }

    pub fn candidate(job_title: &JobTitle, model: &str) -> Self {
        Self {
            name: "Candidate",
            instructions: format!(
                "ROLE: You are a recent graduate interviewing for the {job_title} position.\n\
                GOAL: Show your potential, enthusiasm, and fit for the role.\n\
                BACKGROUND: You have a solid academic record, relevant coursework and projects, \
                and limited professional experience."
            ),
            model: model.to_string(),
        }
    }

    /// Combines the persona with a task into the single user message sent to the model.
    pub fn frame(&self, task: &str) -> String {
        format!("{}\n\n{}", self.instructions, task)
    }
}
