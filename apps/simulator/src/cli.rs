use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::config::Config;
use crate::interview::batch::{fallback_analysis, Simulation, MIN_ANALYSIS_CHARS};
use crate::interview::catalog::{
    default_roster, resolve_job_flag, resolve_job_title, DEFAULT_JOB_TITLE, DEFAULT_NUM_QUESTIONS, JOB_TITLES,
};
use crate::interview::models::{CandidateResult, CandidateSlot, JobTitle, RunResult};
use crate::interview::writer::{latest_results, read_results};
use crate::llm_client::ChatCompletion;

#[derive(Debug, Parser)]
#[command(
    name = "interview-sim",
    version,
    about = "Simulates job interviews across several LLM candidates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one simulation from the terminal (default)
    Run(RunArgs),
    /// Serve the interview HTTP API
    Serve(ServeArgs),
    /// Print the summary of a saved results file (the latest run by default)
    Show(ShowArgs),
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Job position: menu number (1-7), a listed title, or a custom title.
    /// Prompted for when omitted
    #[arg(short = 'j', long = "job")]
    pub job: Option<String>,

    /// Questions per candidate. Prompted for when omitted
    #[arg(short = 'n', long = "questions", value_parser = parse_question_count)]
    pub questions: Option<usize>,

    /// Bind a roster slot to a model, e.g. candidate2=groq/gemma2-9b-it (repeatable)
    #[arg(short = 'm', long = "model", value_parser = parse_slot)]
    pub models: Vec<CandidateSlot>,

    /// Directory for the results file (overrides RESULTS_DIR)
    #[arg(long = "results-dir")]
    pub results_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides PORT)
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Path to an interview_results_*.json file. Defaults to the newest one
    pub path: Option<PathBuf>,

    /// Directory searched for the newest results file
    #[arg(long = "results-dir", env = "RESULTS_DIR", default_value = ".")]
    pub results_dir: PathBuf,

    /// Also print the transcript and evaluation of this candidate slot
    #[arg(short = 'c', long = "candidate")]
    pub candidate: Option<String>,
}

/// Runs one simulation end to end and prints the summary.
pub async fn run(args: RunArgs, config: &Config, llm: Arc<dyn ChatCompletion>) -> Result<()> {
    println!("\n=== LLM Interview Simulator ===");

    let job_title = match args.job {
        Some(choice) => resolve_job_flag(&choice),
        None => prompt_job_title()?,
    };
    let num_questions = match args.questions {
        Some(n) => n,
        None => prompt_num_questions()?,
    };
    let roster = apply_overrides(default_roster(), args.models);

    println!("\nStarting simulation for: {job_title}");
    println!("Questions per interview: {num_questions}");

    let mut settings = config.simulation_settings();
    settings.num_questions = num_questions;
    let results_dir = args.results_dir.unwrap_or_else(|| config.results_dir.clone());

    let (path, result) = Simulation::new(llm, job_title, roster, settings)
        .run_and_save(&results_dir)
        .await?;

    print!("{}", render_summary(&result));
    println!("\nResults saved to: {}", path.display());
    Ok(())
}

/// Prints a previously saved run.
pub fn show(args: &ShowArgs) -> Result<()> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => match latest_results(&args.results_dir)? {
            Some(path) => path,
            None => {
                println!("No previous results found in {}", args.results_dir.display());
                return Ok(());
            }
        },
    };
    let result = read_results(&path)?;

    println!(
        "{} - interviewed {}",
        result.job_title, result.interview_date
    );
    print!("{}", render_summary(&result));

    if let Some(key) = &args.candidate {
        let candidate = result
            .candidates
            .get(key)
            .ok_or_else(|| anyhow!("No candidate '{key}' in {}", path.display()))?;
        print!("{}", render_transcript(key, candidate));
    }
    Ok(())
}

fn prompt_job_title() -> Result<JobTitle> {
    println!("Available job positions:");
    for (i, title) in JOB_TITLES.iter().enumerate() {
        println!("{}. {title}", i + 1);
    }

    let choice = read_line(&format!("\nSelect job position (1-{}): ", JOB_TITLES.len()))?;
    let job_title = resolve_job_title(&choice);
    if choice.trim().is_empty() {
        println!("No choice given. Using default: {DEFAULT_JOB_TITLE}");
    }
    Ok(job_title)
}

fn prompt_num_questions() -> Result<usize> {
    let input = read_line(&format!(
        "Number of questions per interview (default {DEFAULT_NUM_QUESTIONS}): "
    ))?;
    Ok(parse_num_questions(&input))
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Blank, non-numeric, or zero input falls back to the default count.
fn parse_num_questions(input: &str) -> usize {
    let input = input.trim();
    if input.is_empty() {
        return DEFAULT_NUM_QUESTIONS;
    }
    match input.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            warn!("Invalid question count '{input}'. Using default: {DEFAULT_NUM_QUESTIONS}");
            DEFAULT_NUM_QUESTIONS
        }
    }
}

fn parse_question_count(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{raw}' is not a positive integer")),
    }
}

fn parse_slot(raw: &str) -> Result<CandidateSlot, String> {
    let (key, model) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=MODEL, got '{raw}'"))?;
    let (key, model) = (key.trim(), model.trim());
    if key.is_empty() || model.is_empty() {
        return Err(format!("expected SLOT=MODEL, got '{raw}'"));
    }
    Ok(CandidateSlot::new(key, model))
}

/// Rebinds existing slots in place; unknown slot keys are appended.
fn apply_overrides(mut roster: Vec<CandidateSlot>, overrides: Vec<CandidateSlot>) -> Vec<CandidateSlot> {
    for slot in overrides {
        match roster.iter_mut().find(|existing| existing.key == slot.key) {
            Some(existing) => existing.model = slot.model,
            None => roster.push(slot),
        }
    }
    roster
}

/// Per-candidate status lines followed by the comparative analysis.
fn render_summary(result: &RunResult) -> String {
    let mut out = String::from("\n=== Interview Summary ===\n\n");
    for (key, candidate) in result.candidates.iter() {
        out.push_str(&format!(
            "{key}: {} - {}\n",
            candidate.model,
            candidate.status.label()
        ));
    }

    out.push_str("\n=== Comparative Analysis ===\n\n");
    if result.comparative_analysis.chars().count() >= MIN_ANALYSIS_CHARS {
        out.push_str(&result.comparative_analysis);
    } else {
        out.push_str("AI analysis was brief. Using detailed fallback analysis:\n");
        out.push_str(&fallback_analysis(&result.job_title, &result.candidates));
    }
    out.push('\n');
    out
}

fn render_transcript(key: &str, candidate: &CandidateResult) -> String {
    let mut out = format!("\n=== {key} ({}) ===\n", candidate.model);
    for (i, exchange) in candidate.interview_history.iter().enumerate() {
        out.push_str(&format!(
            "\nQ{n}: {q}\nA{n}: {a}\n",
            n = i + 1,
            q = exchange.question,
            a = exchange.answer
        ));
    }
    out.push_str(&format!("\n--- Evaluation ---\n{}\n", candidate.evaluation));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::interview::models::{CandidateResults, Exchange};

    #[test]
    fn test_parse_num_questions() {
        assert_eq!(parse_num_questions(""), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse_num_questions(" 5\n"), 5);
        assert_eq!(parse_num_questions("zero"), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse_num_questions("0"), DEFAULT_NUM_QUESTIONS);
    }

    #[test]
    fn test_parse_slot() {
        let slot = parse_slot("candidate2=groq/gemma2-9b-it").unwrap();
        assert_eq!(slot, CandidateSlot::new("candidate2", "groq/gemma2-9b-it"));
        assert!(parse_slot("candidate2").is_err());
        assert!(parse_slot("=groq/gemma2-9b-it").is_err());
    }

    #[test]
    fn test_apply_overrides_rebinds_and_appends() {
        let roster = apply_overrides(
            default_roster(),
            vec![
                CandidateSlot::new("candidate2", "groq/mixtral-8x7b-32768"),
                CandidateSlot::new("candidate5", "groq/llama-3.1-70b-versatile"),
            ],
        );
        assert_eq!(roster.len(), 5);
        assert_eq!(roster[1].model, "groq/mixtral-8x7b-32768");
        assert_eq!(roster[4].key, "candidate5");
    }

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::parse_from([
            "interview-sim",
            "run",
            "--job",
            "5",
            "-n",
            "2",
            "-m",
            "candidate1=groq/gemma2-9b-it",
        ]);
        match cli.command {
            Some(Command::Run(args)) => {
                assert_eq!(args.job.as_deref(), Some("5"));
                assert_eq!(args.questions, Some(2));
                assert_eq!(args.models.len(), 1);
            }
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_questions() {
        assert!(Cli::try_parse_from(["interview-sim", "run", "-n", "0"]).is_err());
    }

    #[test]
    fn test_render_summary_lists_statuses_and_brief_fallback() {
        let mut candidates = CandidateResults::new();
        candidates.insert(
            "candidate1".to_string(),
            CandidateResult::completed("groq/gemma2-9b-it", Vec::new(), "PASS".to_string()),
        );
        let result = RunResult {
            job_title: JobTitle::new("Data Analyst"),
            interview_date: NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            candidates,
            comparative_analysis: "Too short".to_string(),
        };

        let summary = render_summary(&result);
        assert!(summary.contains("candidate1: groq/gemma2-9b-it - COMPLETED"));
        assert!(summary.contains("AI analysis was brief"));
        assert!(summary.contains("Completed Interviews: 1"));
    }

    #[test]
    fn test_render_transcript_numbers_exchanges() {
        let candidate = CandidateResult::completed(
            "groq/gemma2-9b-it",
            vec![
                Exchange {
                    question: "Why us?".to_string(),
                    answer: "Your mission.".to_string(),
                },
                Exchange {
                    question: "A weakness?".to_string(),
                    answer: "Public speaking.".to_string(),
                },
            ],
            "PASS".to_string(),
        );

        let out = render_transcript("candidate3", &candidate);
        assert!(out.contains("=== candidate3 (groq/gemma2-9b-it) ==="));
        assert!(out.contains("Q2: A weakness?\nA2: Public speaking."));
        assert!(out.ends_with("--- Evaluation ---\nPASS\n"));
    }

    #[test]
    fn test_cli_show_path_is_optional() {
        let cli = Cli::parse_from(["interview-sim", "show", "--results-dir", "runs"]);
        match cli.command {
            Some(Command::Show(args)) => {
                assert!(args.path.is_none());
                assert_eq!(args.results_dir, PathBuf::from("runs"));
            }
            other => panic!("expected show command, got {other:?}"),
        }
    }

    #[test]
    fn test_show_without_results_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ShowArgs {
            path: None,
            results_dir: dir.path().to_path_buf(),
            candidate: None,
        };
        assert!(show(&args).is_ok());
    }

    #[test]
    fn test_show_reads_latest_run_and_unknown_candidate_fails() {
        let dir = tempfile::tempdir().unwrap();
        let run = RunResult {
            job_title: JobTitle::new("Software Engineer"),
            interview_date: NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            candidates: CandidateResults::new(),
            comparative_analysis: "No successful interviews to analyze.".to_string(),
        };
        crate::interview::writer::write_results(dir.path(), &run).unwrap();

        let mut args = ShowArgs {
            path: None,
            results_dir: dir.path().to_path_buf(),
            candidate: None,
        };
        assert!(show(&args).is_ok());

        args.candidate = Some("candidate9".to_string());
        assert!(show(&args).is_err());
    }
}
