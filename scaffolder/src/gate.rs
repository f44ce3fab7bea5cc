//! Confirmation gate between a generated proposal and the filesystem.
//!
//! The gate moves through `AwaitingParse -> AwaitingUserChoice -> {Accepted,
//! Rejected}`. Parsing is [`Proposal::parse`]; the session reports a parse
//! failure exactly like a failed request. [`confirm`] covers the rest: it
//! shows the tree and blocks on the console until it gets a valid answer.

use anyhow::{Result, bail};
use tracing::debug;

use crate::core::choice::{Choice, parse_choice};
use crate::core::render::render_tree;
use crate::io::console::Console;
use crate::tree::FolderTree;

pub const CONFIRM_QUESTION: &str = "Does this response look good?";
pub const CHOICE_PROMPT: &str = "> Y or N: ";
pub const INVALID_INPUT: &str = "Invalid input. Please enter 'Y' or 'N'.";
pub const ACCEPTED: &str = "Great, I'll get started!";
pub const REJECTED: &str = "Try again!";

const RULE: &str = "============================================";

/// Raw backend response together with its parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub raw: String,
    pub tree: FolderTree,
}

impl Proposal {
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let tree = FolderTree::parse(&raw)?;
        debug!(
            folders = tree.folder_count(),
            depth = tree.depth(),
            "parsed folder proposal"
        );
        Ok(Self { raw, tree })
    }
}

/// Result of the gate. `Rejected` is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Accepted(FolderTree),
    Rejected,
}

/// Show `proposal` and wait for the user to accept or reject it.
///
/// Invalid answers re-prompt indefinitely. End of input is an error because
/// no answer can arrive any more.
pub fn confirm<C: Console>(console: &mut C, proposal: Proposal) -> Result<GateOutcome> {
    console.say(CONFIRM_QUESTION)?;
    console.say(RULE)?;
    console.say(&render_tree(&proposal.tree))?;
    console.say(RULE)?;

    match await_choice(console)? {
        Choice::Accept => {
            console.say(ACCEPTED)?;
            Ok(GateOutcome::Accepted(proposal.tree))
        }
        Choice::Reject => {
            console.say(REJECTED)?;
            Ok(GateOutcome::Rejected)
        }
    }
}

fn await_choice<C: Console>(console: &mut C) -> Result<Choice> {
    loop {
        let Some(line) = console.prompt(CHOICE_PROMPT)? else {
            bail!("input closed before a Y or N answer");
        };
        match parse_choice(&line) {
            Some(choice) => {
                debug!(?choice, "confirmation answered");
                return Ok(choice);
            }
            None => console.say(INVALID_INPUT)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedConsole;

    const PAYLOAD: &str = r#"{"Garden": {"plans": null, "photos": {"2024": null}}}"#;

    #[test]
    fn accept_returns_the_displayed_tree() {
        let proposal = Proposal::parse(PAYLOAD).expect("parse");
        let shown = proposal.tree.clone();
        let mut console = ScriptedConsole::new(["Y"]);

        let outcome = confirm(&mut console, proposal).expect("confirm");

        assert_eq!(outcome, GateOutcome::Accepted(shown.clone()));
        assert!(console.printed(&render_tree(&shown)));
        assert!(console.printed(ACCEPTED));
    }

    #[test]
    fn invalid_answers_reprompt_until_reject() {
        let proposal = Proposal::parse(PAYLOAD).expect("parse");
        let mut console = ScriptedConsole::new(["x", "yes", " n", "n"]);

        let outcome = confirm(&mut console, proposal).expect("confirm");

        assert_eq!(outcome, GateOutcome::Rejected);
        assert_eq!(console.count(INVALID_INPUT), 3);
        assert_eq!(console.prompts_seen(), 4);
        assert!(console.printed(REJECTED));
        assert!(!console.printed(ACCEPTED));
    }

    #[test]
    fn lowercase_y_accepts() {
        let proposal = Proposal::parse(PAYLOAD).expect("parse");
        let mut console = ScriptedConsole::new(["y"]);
        let outcome = confirm(&mut console, proposal).expect("confirm");
        assert!(matches!(outcome, GateOutcome::Accepted(_)));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let proposal = Proposal::parse(PAYLOAD).expect("parse");
        let mut console = ScriptedConsole::new(["maybe"]);

        let err = confirm(&mut console, proposal).unwrap_err();

        assert!(err.to_string().contains("input closed"));
        assert_eq!(console.count(INVALID_INPUT), 1);
    }

    #[test]
    fn parse_keeps_raw_text() {
        let proposal = Proposal::parse(PAYLOAD).expect("parse");
        assert_eq!(proposal.raw, PAYLOAD);
        assert_eq!(proposal.tree.folder_count(), 4);
    }
}
