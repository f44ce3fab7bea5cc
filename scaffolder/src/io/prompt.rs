//! Prompt builder for folder-structure proposals.

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use tracing::debug;

use crate::io::config::GenerationConfig;

const PROPOSAL_TEMPLATE: &str = include_str!("prompts/proposal.md");

/// Template engine wrapper around minijinja.
struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("proposal", PROPOSAL_TEMPLATE)
            .context("load proposal template")?;
        Ok(Self { env })
    }

    fn render_proposal(&self, input: &PromptInputs, generation: &GenerationConfig) -> Result<String> {
        let template = self.env.get_template("proposal")?;
        let rendered = template
            .render(context! {
                project_type => input.project_type.trim(),
                topic => input.topic.trim(),
                max_depth => generation.max_depth,
                language => generation.language.trim(),
            })
            .context("render proposal template")?;
        Ok(rendered)
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInputs {
    /// Kind of project, e.g. "Static Website" or "Research".
    pub project_type: String,
    /// Subject the folders are organised around.
    pub topic: String,
}

/// Builds the instruction sent to the generation backend.
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    generation: &'a GenerationConfig,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(generation: &'a GenerationConfig) -> Self {
        Self { generation }
    }

    pub fn build(&self, input: &PromptInputs) -> Result<PromptPack> {
        let content = PromptEngine::new()?.render_proposal(input, self.generation)?;
        debug!(
            bytes = content.len(),
            max_depth = self.generation.max_depth,
            "built proposal prompt"
        );
        Ok(PromptPack { content })
    }
}

/// A rendered prompt ready to send to the backend.
#[derive(Debug, Clone)]
pub struct PromptPack {
    content: String,
}

impl PromptPack {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consume the pack, yielding the rendered prompt.
    pub fn render(self) -> String {
        self.content
    }
}
