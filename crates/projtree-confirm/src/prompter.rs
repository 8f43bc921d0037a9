//! The collaborator the flow uses to talk to the user.

use std::collections::VecDeque;

use crate::error::PromptError;

/// Synchronous question/answer channel to the user.
pub trait Prompter {
    /// Show an informational line.
    fn say(&mut self, line: &str);

    /// Ask `question` and return the raw answer.
    fn ask(&mut self, question: &str) -> Result<String, PromptError>;
}

/// Prompter answering from a fixed script, recording everything it was told.
///
/// Once the script runs out every further question fails with
/// [`PromptError::Closed`].
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Lines said and questions asked, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        self.transcript.push(question.to_string());
        self.answers.pop_front().ok_or(PromptError::Closed)
    }
}
