//! Chat supervision: delegated backend with rule-based fallback

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::interpreter::{Reply, RuleInterpreter};
use crate::domain::BinaryTree;
use crate::infrastructure::traits::ChatBackend;

/// Service interpreting chat messages against a selected tree.
///
/// A delegated backend (e.g. an LLM-backed agent) may be injected; it gets
/// the first shot at every message. The rule-based interpreter is always the
/// fallback, so a backend failure never surfaces to the caller.
pub struct ChatService {
    rules: RuleInterpreter,
    backend: Option<Arc<dyn ChatBackend>>,
}

impl Default for ChatService {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatService {
    pub fn new() -> Self {
        Self {
            rules: RuleInterpreter::new(),
            backend: None,
        }
    }

    pub fn with_backend(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            rules: RuleInterpreter::new(),
            backend: Some(backend),
        }
    }

    /// Interpret one chat message.
    ///
    /// `None` means no tree is selected; nothing is executed and the reply
    /// says so. A configured backend runs against a clone of the tree, which
    /// is committed only on success, so a half-applied backend failure cannot
    /// corrupt the tree before the rule-based fallback runs.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn handle(&self, tree: Option<&mut BinaryTree>, message: &str) -> Reply {
        let Some(tree) = tree else {
            return Reply::info("No tree selected.");
        };

        if let Some(backend) = &self.backend {
            let mut candidate = tree.clone();
            match backend.interpret(&mut candidate, message) {
                Ok(reply) => {
                    *tree = candidate;
                    return reply;
                }
                Err(err) => {
                    debug!("chat backend failed, using rule-based fallback: {err}");
                }
            }
        }

        self.rules.interpret(tree, message)
    }

    /// Direct access to the rule-based command execution, used by the CLI's
    /// structural subcommands so their responses match the chat templates.
    pub fn rules(&self) -> &RuleInterpreter {
        &self.rules
    }
}
