//! Interactive confirmation for projtree.
//!
//! Before a manifest is built the user confirms how the reference should be
//! read (commit hash or branch) and decides what to do about missing ignore
//! rule files. The conversation is driven by [`ConfirmationFlow`], a small
//! state machine that talks to the user only through a [`Prompter`], so it
//! runs the same against a terminal or a [`ScriptedPrompter`].

mod error;
mod flow;
mod ignore_files;
mod prompter;

pub use error::{ConfirmError, PromptError};
pub use flow::{ConfirmationFlow, FlowState, Resolution};
pub use ignore_files::{
    IgnoreFileChoice, IgnoreFileDecision, default_content, materialize, missing_rule_files,
};
pub use prompter::{Prompter, ScriptedPrompter};
