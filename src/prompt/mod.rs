// ABOUTME: Prompter capability trait for blocking question/answer exchanges.
// ABOUTME: Options imply a closed choice; free text supports validation and masking.

mod terminal;

pub use terminal::TermPrompter;

use async_trait::async_trait;
use thiserror::Error;

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// A single question put to the user.
pub struct Question {
    text: String,
    default: Option<String>,
    options: Vec<String>,
    masked: bool,
    validator: Option<Validator>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default: None,
            options: Vec::new(),
            masked: false,
            validator: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restrict the answer to one of `options` (closed choice).
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Hide the typed answer (passwords).
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn validate(&self, answer: &str) -> Result<(), String> {
        match &self.validator {
            Some(validator) => validator(answer),
            None => Ok(()),
        }
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }
}

#[derive(Debug, Error)]
pub enum PromptError {
    /// The user cancelled the prompt (Esc / Ctrl-C).
    #[error("prompt aborted by user")]
    Aborted,

    #[error("terminal error: {0}")]
    Terminal(String),
}

/// Blocking question/answer exchange with the user.
///
/// Implementations must re-prompt on validation failure; an answer returned
/// from `ask` always satisfies the question's validator.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask(&self, question: &Question) -> Result<String, PromptError>;
}
