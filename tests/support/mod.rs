// ABOUTME: Shared test doubles for resolution tests.
// ABOUTME: Scripted prompter, mock registry client, static Dockerfile inspector.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use stevedore::cloud::ProjectSource;
use stevedore::dockerfile::{DockerfileError, DockerfileInspector};
use stevedore::prompt::{PromptError, Prompter, Question};
use stevedore::registry::{AuthOutcome, RegistryClient, RegistryError};

/// One scripted reply to a prompt.
pub enum Answer {
    Text(String),
    Abort,
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

/// Prompter that replays a fixed script of answers.
///
/// Answers rejected by a question's validator are dropped and the next
/// scripted answer is consumed, mirroring an in-place re-prompt.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    questions_asked: AtomicUsize,
    defaults_seen: Mutex<Vec<Option<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            questions_asked: AtomicUsize::new(0),
            defaults_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(answers: &[&str]) -> Self {
        Self::new(answers.iter().map(|a| Answer::text(a)).collect())
    }

    /// Number of `ask` calls received (validation retries don't count).
    pub fn questions_asked(&self) -> usize {
        self.questions_asked.load(Ordering::SeqCst)
    }

    /// Default values offered by each question, in order.
    pub fn defaults_seen(&self) -> Vec<Option<String>> {
        self.defaults_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&self, question: &Question) -> Result<String, PromptError> {
        self.questions_asked.fetch_add(1, Ordering::SeqCst);
        self.defaults_seen
            .lock()
            .unwrap()
            .push(question.default_value().map(str::to_string));

        loop {
            let next = self
                .answers
                .lock()
                .unwrap()
                .pop_front()
                .expect("prompter script exhausted");

            match next {
                Answer::Abort => return Err(PromptError::Aborted),
                Answer::Text(answer) => {
                    if question.validate(&answer).is_ok() {
                        return Ok(answer);
                    }
                    // Invalid answer: consume the next one, like a re-prompt.
                }
            }
        }
    }
}

/// Registry client with scripted probe and login behavior.
pub struct MockRegistryClient {
    stored: Option<AuthOutcome>,
    probe_fails: bool,
    ping_ok: bool,
    login_results: Mutex<VecDeque<Result<(), String>>>,
    login_calls: Mutex<Vec<(String, String, String)>>,
}

impl MockRegistryClient {
    pub fn unauthenticated() -> Self {
        Self {
            stored: None,
            probe_fails: false,
            ping_ok: true,
            login_results: Mutex::new(VecDeque::new()),
            login_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn logged_in(username: &str) -> Self {
        Self {
            stored: Some(AuthOutcome::authenticated(username)),
            ..Self::unauthenticated()
        }
    }

    pub fn probe_error() -> Self {
        Self {
            probe_fails: true,
            ..Self::unauthenticated()
        }
    }

    pub fn ping_down(self) -> Self {
        Self {
            ping_ok: false,
            ..self
        }
    }

    /// Queue login results; once exhausted, further logins succeed.
    pub fn with_login_results(self, results: Vec<Result<(), String>>) -> Self {
        *self.login_results.lock().unwrap() = results.into();
        self
    }

    pub fn login_calls(&self) -> Vec<(String, String, String)> {
        self.login_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryClient for MockRegistryClient {
    async fn probe_credentials(&self, _host: &str) -> Result<AuthOutcome, RegistryError> {
        if self.probe_fails {
            return Err(RegistryError::ProbeFailed("scripted probe failure".into()));
        }
        Ok(self
            .stored
            .clone()
            .unwrap_or_else(AuthOutcome::unauthenticated))
    }

    async fn login(
        &self,
        host: &str,
        username: &str,
        password: &str,
    ) -> Result<(), RegistryError> {
        self.login_calls.lock().unwrap().push((
            host.to_string(),
            username.to_string(),
            password.to_string(),
        ));

        match self.login_results.lock().unwrap().pop_front() {
            Some(Ok(())) | None => Ok(()),
            Some(Err(msg)) => Err(RegistryError::LoginFailed(msg)),
        }
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        if self.ping_ok {
            Ok(())
        } else {
            Err(RegistryError::Unreachable("scripted outage".into()))
        }
    }
}

/// Inspector that returns a fixed stage list without touching the filesystem.
pub struct StaticInspector {
    stages: Result<Vec<String>, ()>,
}

impl StaticInspector {
    pub fn with_stages(stages: &[&str]) -> Self {
        Self {
            stages: Ok(stages.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn failing() -> Self {
        Self { stages: Err(()) }
    }
}

impl DockerfileInspector for StaticInspector {
    fn extract_stage_names(
        &self,
        path: &std::path::Path,
    ) -> Result<Vec<String>, DockerfileError> {
        match &self.stages {
            Ok(stages) => Ok(stages.clone()),
            Err(()) => Err(DockerfileError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted read failure"),
            }),
        }
    }
}

/// Project source returning a fixed value.
pub struct FixedProject(pub Option<String>);

impl ProjectSource for FixedProject {
    fn current_project(&self) -> Option<String> {
        self.0.clone()
    }
}
