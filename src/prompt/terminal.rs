// ABOUTME: Terminal-backed Prompter implementation using dialoguer.
// ABOUTME: Select for closed choices, Input/Password for free text.

use async_trait::async_trait;
use dialoguer::{Input, Password, Select};

use super::{PromptError, Prompter, Question};

/// Interactive prompter for a real terminal.
pub struct TermPrompter;

impl TermPrompter {
    pub fn new() -> Self {
        Self
    }

    fn ask_select(&self, question: &Question) -> Result<String, PromptError> {
        let options = question.options();
        let default_index = question
            .default_value()
            .and_then(|d| options.iter().position(|o| o == d))
            .unwrap_or(0);

        let selection = Select::new()
            .with_prompt(question.text())
            .items(options)
            .default(default_index)
            .interact_opt()
            .map_err(map_dialoguer_error)?;

        match selection {
            Some(index) => Ok(options[index].clone()),
            None => Err(PromptError::Aborted),
        }
    }

    fn ask_password(&self, question: &Question) -> Result<String, PromptError> {
        Password::new()
            .with_prompt(question.text())
            .allow_empty_password(true)
            .interact()
            .map_err(map_dialoguer_error)
    }

    fn ask_text(&self, question: &Question) -> Result<String, PromptError> {
        let mut input = Input::<String>::new()
            .with_prompt(question.text())
            .allow_empty(true);

        if let Some(default) = question.default_value() {
            input = input.default(default.to_string());
        }
        if question.has_validator() {
            // dialoguer re-prompts in place until the validator accepts.
            input = input.validate_with(|answer: &String| question.validate(answer));
        }

        input.interact_text().map_err(map_dialoguer_error)
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for TermPrompter {
    async fn ask(&self, question: &Question) -> Result<String, PromptError> {
        if !question.options().is_empty() {
            self.ask_select(question)
        } else if question.is_masked() {
            self.ask_password(question)
        } else {
            self.ask_text(question)
        }
    }
}

fn map_dialoguer_error(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            PromptError::Aborted
        }
        other => PromptError::Terminal(other.to_string()),
    }
}
