// Terminal prompts backed by `dialoguer`. Any prompt error (closed stdin,
// no terminal) counts as a "no" so a loop never spins on a dead input.

use crate::services::pagination::Continuation;
use dialoguer::{Confirm, Input};
use log::warn;

/// "Load more?" asked after every page.
pub struct LoadMorePrompt {
    question: &'static str,
}

impl LoadMorePrompt {
    pub fn new(question: &'static str) -> Self {
        LoadMorePrompt { question }
    }
}

impl Continuation for LoadMorePrompt {
    fn load_more(&mut self, _shown: u32) -> bool {
        match Confirm::new()
            .with_prompt(self.question)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Prompt failed: {}", e);
                false
            }
        }
    }
}

/// Free-text answer; empty input is allowed.
pub fn ask(prompt: &str) -> std::io::Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
}
