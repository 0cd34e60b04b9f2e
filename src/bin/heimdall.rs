//! heimdall: career assistant CLI
//!
//! Runs the assistant features from the command line. Every command prints
//! an answer even when the provider is unavailable; fallbacks are flagged
//! on stderr.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use heimdall::config::{Config, Secrets};
use heimdall::{
    Assistant, CareerQuestion, CoverLetterRequest, Heimdall, JobFitRequest, Outcome, ResumeReview,
    ResumeRewrite, RewriteSummary,
};
use serde::Serialize;

/// Heimdall career assistant
#[derive(Parser)]
#[command(name = "heimdall")]
#[command(version = heimdall::PKG_VERSION)]
#[command(about = "Rate-limited, cached career assistant with offline fallbacks")]
struct Args {
    /// Config file (default: ~/.heimdall/config.toml, then /etc/heimdall/config.toml)
    #[arg(short, long, env = "HEIMDALL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a career question
    Ask {
        /// Question (or omit to read from stdin)
        question: Option<String>,
        /// Target role for context
        #[arg(short, long)]
        role: Option<String>,
        /// Résumé file; only its presence is used as context
        #[arg(long)]
        resume: Option<PathBuf>,
    },

    /// Review a résumé for a target role
    Review {
        /// Résumé text file
        resume: PathBuf,
        /// Target role
        #[arg(short, long)]
        role: String,
        /// Job description text file
        #[arg(short, long)]
        job: Option<PathBuf>,
    },

    /// Score how well a résumé fits a job description
    Fit {
        /// Résumé text file
        resume: PathBuf,
        /// Job description text file
        job: PathBuf,
    },

    /// Draft a cover letter
    CoverLetter {
        /// Résumé text file
        resume: PathBuf,
        /// Target role
        #[arg(short, long)]
        role: String,
        /// Company name
        #[arg(long)]
        company: Option<String>,
    },

    /// Rewrite a résumé and list the main improvements
    Rewrite {
        /// Résumé text file
        resume: PathBuf,
        /// Target role
        #[arg(short, long)]
        role: String,
        /// Job description text file
        #[arg(short, long)]
        job: Option<PathBuf>,
    },

    /// Print the offline answer for a topic without contacting any provider
    Fallback {
        /// Topic (or omit to read from stdin)
        topic: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: heimdall=info; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("heimdall=info")),
        )
        .init();

    let args = Args::parse();
    tracing::debug!(version = %heimdall::version_string(), "heimdall starting");

    // Commands that don't require a provider
    if let Command::Fallback { topic } = args.command {
        let topic = resolve_text(topic, "fallback")?;
        println!("{}", heimdall::fallback::generate(&topic));
        return Ok(());
    }

    let assistant = build_assistant(args.config.as_deref())?;

    match args.command {
        Command::Ask {
            question,
            role,
            resume,
        } => {
            let question = resolve_text(question, "ask")?;
            let mut request = CareerQuestion::new(question).with_resume(resume.is_some());
            if let Some(role) = role {
                request = request.job_role(role);
            }
            print_text(assistant.ask(&request).await);
        }

        Command::Review { resume, role, job } => {
            let mut review = ResumeReview::new(read_file(&resume)?, role);
            if let Some(job) = job {
                review = review.job_description(read_file(&job)?);
            }
            print_json(&assistant.review_resume(&review).await)?;
        }

        Command::Fit { resume, job } => {
            let request = JobFitRequest::new(read_file(&resume)?, read_file(&job)?);
            print_json(&assistant.job_fit(&request).await)?;
        }

        Command::CoverLetter {
            resume,
            role,
            company,
        } => {
            let mut request = CoverLetterRequest::new(read_file(&resume)?, role);
            if let Some(company) = company {
                request = request.company(company);
            }
            print_text(assistant.cover_letter(&request).await);
        }

        Command::Rewrite { resume, role, job } => {
            let original = read_file(&resume)?;
            let mut request = ResumeRewrite::new(original.clone(), role);
            if let Some(job) = job {
                request = request.job_description(read_file(&job)?);
            }
            let outcome = assistant.rewrite_resume(&request).await;
            note_fallback(&outcome);
            let rewritten = outcome.into_value();
            println!("{rewritten}\n");
            print_text(
                assistant
                    .summarize_rewrite(&RewriteSummary::new(original, rewritten))
                    .await,
            );
        }

        Command::Fallback { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Load config and secrets, then build the assistant.
fn build_assistant(config_path: Option<&Path>) -> Result<Assistant, Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let secrets = Secrets::load()?;

    let mut builder = config.apply(Heimdall::builder());
    if let Some(key) = secrets.api_key() {
        builder = builder.gemini(key);
    }
    Ok(builder.build()?)
}

fn read_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

fn print_text(outcome: Outcome<String>) {
    note_fallback(&outcome);
    println!("{}", outcome.into_value());
}

fn print_json<T: Serialize>(outcome: &Outcome<T>) -> Result<(), Box<dyn std::error::Error>> {
    note_fallback(outcome);
    println!("{}", serde_json::to_string_pretty(outcome.value())?);
    Ok(())
}

fn note_fallback<T>(outcome: &Outcome<T>) {
    if let Some(reason) = outcome.fallback_reason() {
        eprintln!("note: offline answer ({reason})");
    }
}

/// Resolve text input from an optional CLI argument and/or stdin.
///
/// - arg only → arg
/// - stdin only → stdin
/// - both → `"{arg}\n\n{stdin}"`
/// - neither → error
fn resolve_text(arg: Option<String>, command: &str) -> Result<String, Box<dyn std::error::Error>> {
    let stdin_text = if io::stdin().is_terminal() {
        None
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    };

    match (arg, stdin_text) {
        (Some(a), Some(s)) => Ok(format!("{a}\n\n{s}")),
        (Some(a), None) => Ok(a),
        (None, Some(s)) => Ok(s),
        (None, None) => {
            Err(format!("{command}: no input provided (pass text as argument or via stdin)").into())
        }
    }
}
