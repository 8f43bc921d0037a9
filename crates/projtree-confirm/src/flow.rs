//! The confirmation state machine.

use std::path::PathBuf;

use projtree_core::{RefMode, RefSpec};
use tracing::{debug, info};

use crate::error::{ConfirmError, PromptError};
use crate::ignore_files::{IgnoreFileChoice, IgnoreFileDecision};
use crate::prompter::Prompter;

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// The guessed mode has not been confirmed yet.
    AwaitingClassification,
    /// The mode is settled, missing rule files still need a decision.
    AwaitingIgnoreFileDecision,
    /// Everything is decided.
    Resolved,
    /// The user chose to exit, or input ended.
    Aborted,
}

/// Final decisions handed to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Effective mode for the whole build.
    pub mode: RefMode,
    /// Rule files to create before rules are loaded. Empty when none were missing.
    pub ignore_files: Vec<IgnoreFileDecision>,
}

/// Confirms the reference mode and decides on missing rule files.
///
/// The guessed mode comes from [`RefSpec::classify`]. A hash-like guess can
/// be swapped to branch mode once; a branch guess can only be accepted or
/// abandoned.
#[derive(Debug, Clone)]
pub struct ConfirmationFlow {
    refspec: RefSpec,
    mode: RefMode,
    missing: Vec<PathBuf>,
    decisions: Vec<IgnoreFileDecision>,
    state: FlowState,
}

impl ConfirmationFlow {
    /// Start a flow for `refspec`, with `missing` rule files to decide on.
    pub fn new(refspec: RefSpec, missing: Vec<PathBuf>) -> Self {
        let mode = refspec.classify();
        Self {
            refspec,
            mode,
            missing,
            decisions: Vec::new(),
            state: FlowState::AwaitingClassification,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Current mode: the guess until confirmed, then the effective one.
    pub fn mode(&self) -> RefMode {
        self.mode
    }

    /// Advance by one state.
    pub fn step(&mut self, prompter: &mut dyn Prompter) -> Result<FlowState, ConfirmError> {
        let next = match self.state {
            FlowState::AwaitingClassification => self.confirm_classification(prompter),
            FlowState::AwaitingIgnoreFileDecision => self.decide_ignore_files(prompter),
            FlowState::Resolved | FlowState::Aborted => return Err(ConfirmError::Finished),
        };

        match next {
            Ok(state) => {
                debug!("Confirmation flow: {:?} -> {state:?}", self.state);
                self.state = state;
                Ok(state)
            }
            Err(err) => {
                self.state = FlowState::Aborted;
                Err(err.into())
            }
        }
    }

    /// Drive the flow to a terminal state.
    pub fn run(mut self, prompter: &mut dyn Prompter) -> Result<Resolution, ConfirmError> {
        loop {
            match self.step(prompter)? {
                FlowState::Resolved => {
                    return Ok(Resolution {
                        mode: self.mode,
                        ignore_files: self.decisions,
                    });
                }
                FlowState::Aborted => return Err(ConfirmError::Aborted),
                _ => {}
            }
        }
    }

    fn confirm_classification(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<FlowState, PromptError> {
        let hash = self.mode.is_hash();

        prompter.say("Parsed GitHub ref:");
        prompter.say(&format!("    user:   {}", self.refspec.owner));
        prompter.say(&format!("    repo:   {}", self.refspec.repo));
        prompter.say(&format!("    ref:    {}", self.refspec.git_ref));
        prompter.say(&format!(
            "    type:   {}",
            if hash { "commit hash*" } else { "branch" }
        ));
        prompter.say("");

        if hash {
            prompter.say(
                " * Note: this is 40 hex characters, but confirm that it is a commit hash.",
            );
        }
        prompter.say("In case of any other errors, press [x] to exit and try again!");
        if hash {
            prompter.say(
                "If the given ref value is correct, but not a commit hash, press [s] (swap), \
                 and from now on it will be read as a branch.",
            );
        }
        prompter.say("If everything is fine, press [c] to continue!");

        let answer = if hash {
            ask_choice(prompter, "Swap / eXit / Continue ? (s/x/c): ", &["s", "x", "c"])?
        } else {
            ask_choice(prompter, "eXit / Continue ? (x/c): ", &["x", "c"])?
        };

        match answer.as_str() {
            "x" => {
                prompter.say("Quitting at the user's request.");
                Ok(FlowState::Aborted)
            }
            "s" => {
                self.mode = RefMode::BranchLike;
                prompter.say("Swapped: the ref will be read as a branch.");
                Ok(FlowState::AwaitingIgnoreFileDecision)
            }
            _ => {
                prompter.say("Continue process");
                Ok(FlowState::AwaitingIgnoreFileDecision)
            }
        }
    }

    fn decide_ignore_files(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<FlowState, PromptError> {
        if self.missing.is_empty() {
            info!("All ignore files are present");
            return Ok(FlowState::Resolved);
        }

        let question = match self.missing.as_slice() {
            [only] => format!(
                "There is no {} file in the root directory, should I create it with base \
                 content (for an empty file choose no)? (y/n): ",
                only.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| only.display().to_string())
            ),
            _ => "There are no ignore files in the root directory, should I create them with \
                  base content (for an empty file choose no)? (y/n): "
                .to_string(),
        };

        let choice = match ask_choice(prompter, &question, &["y", "n"])?.as_str() {
            "y" => IgnoreFileChoice::DefaultContent,
            _ => IgnoreFileChoice::Empty,
        };

        self.decisions = self
            .missing
            .iter()
            .map(|path| IgnoreFileDecision {
                path: path.clone(),
                choice,
            })
            .collect();

        Ok(FlowState::Resolved)
    }
}

/// Ask until the trimmed, lowercased answer is one of `valid`.
fn ask_choice(
    prompter: &mut dyn Prompter,
    question: &str,
    valid: &[&str],
) -> Result<String, PromptError> {
    loop {
        let answer = prompter.ask(question)?.trim().to_lowercase();
        if valid.contains(&answer.as_str()) {
            return Ok(answer);
        }
    }
}
