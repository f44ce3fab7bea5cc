//! Orchestration for one interactive scaffolding session.
//!
//! A session reads the project type and topic, requests one proposal, runs
//! the confirmation gate and, on acceptance, creates the folders. Request and
//! parse failures end the session with a printed message and no filesystem
//! changes; filesystem failures propagate to the caller.

use anyhow::{Context, Result, bail};
use tracing::{info, instrument, warn};

use crate::gate::{GateOutcome, Proposal, confirm};
use crate::io::config::AppConfig;
use crate::io::console::Console;
use crate::io::materialize::{MaterializeReport, materialize};
use crate::io::prompt::{PromptBuilder, PromptInputs};
use crate::io::requester::ProposalRequester;

pub const PROJECT_TYPE_PROMPT: &str = "Project Type:";
pub const TOPIC_PROMPT: &str = "Topic:";
pub const COMPLETE: &str = "Complete!";

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The proposal was accepted and every folder exists on disk.
    Completed(MaterializeReport),
    /// The user declined the proposal.
    Rejected,
    /// Building, sending, or parsing the request failed. Holds the printed message.
    RequestFailed(String),
}

/// Run one session against `requester`, talking to the user via `console`.
#[instrument(skip_all, fields(model = %config.generation.model))]
pub fn run_session<R: ProposalRequester, C: Console>(
    config: &AppConfig,
    requester: &R,
    console: &mut C,
) -> Result<SessionOutcome> {
    let inputs = read_inputs(console)?;

    let proposal = match fetch_proposal(config, requester, &inputs) {
        Ok(proposal) => proposal,
        Err(err) => {
            let message = format!("{err:#}");
            warn!(error = %message, "proposal request failed");
            console.say(&message)?;
            return Ok(SessionOutcome::RequestFailed(message));
        }
    };

    match confirm(console, proposal)? {
        GateOutcome::Rejected => {
            info!("proposal rejected");
            Ok(SessionOutcome::Rejected)
        }
        GateOutcome::Accepted(tree) => {
            let report = materialize(&tree, &config.generation.base_path)?;
            console.say(COMPLETE)?;
            Ok(SessionOutcome::Completed(report))
        }
    }
}

fn read_inputs<C: Console>(console: &mut C) -> Result<PromptInputs> {
    let project_type = read_required(console, PROJECT_TYPE_PROMPT)?;
    let topic = read_required(console, TOPIC_PROMPT)?;
    Ok(PromptInputs {
        project_type,
        topic,
    })
}

fn read_required<C: Console>(console: &mut C, prompt: &str) -> Result<String> {
    match console.prompt(prompt)? {
        Some(line) => Ok(line),
        None => bail!("input closed at {prompt:?}"),
    }
}

fn fetch_proposal<R: ProposalRequester>(
    config: &AppConfig,
    requester: &R,
    inputs: &PromptInputs,
) -> Result<Proposal> {
    let prompt = PromptBuilder::new(&config.generation).build(inputs)?.render();
    let raw = requester
        .request(&prompt)
        .context("request folder proposal")?;
    Proposal::parse(raw).context("parse folder proposal")
}
