//! Rule-based command interpretation for chat messages
//!
//! Maps a free-text message to a [`Command`] by keyword priority, then drives
//! the tree engine and formats the response. This is deliberately not language
//! understanding: first matching keyword wins, numbers are taken left to right.

use itertools::Itertools;
use regex::Regex;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{BinaryTree, Position};

/// Fixed help text returned for messages no rule matches.
pub const HELP_TEXT: &str = "Sorry, I didn't understand that. Try commands like \
'insert 8 as left child of 4', 'delete 5', 'update 5 as 10', 'search for 5', \
'what is the height', or 'show inorder traversal'.";

/// Result of interpreting one message against one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// True when the tree changed and the caller must persist it
    pub mutated: bool,
}

impl Reply {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mutated: false,
        }
    }

    pub fn mutation(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mutated: true,
        }
    }
}

/// Parsed intent of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Height,
    Leaves,
    Insert {
        new_value: i64,
        parent_value: i64,
        position: Position,
    },
    Delete {
        value: i64,
    },
    Update {
        old_value: i64,
        new_value: i64,
    },
    Search {
        value: i64,
    },
    InorderTraversal,
    PreorderTraversal,
    PostorderTraversal,
    Unrecognized,
}

/// Missing-argument prompts. `Display` is the exact user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Please provide the values to insert (e.g., 'Insert 8 as left child of 4').")]
    InsertNeedsValues,

    #[error("Please specify value to delete.")]
    DeleteNeedsValue,

    #[error("Please provide both old and new values (e.g., 'update node 5 as 10' or 'change 5 to 10').")]
    UpdateNeedsValues,

    #[error("Please specify the value to search for (e.g., 'search for 5').")]
    SearchNeedsValue,
}

/// Keyword-driven interpreter over the tree engine.
pub struct RuleInterpreter {
    number_regex: Regex,
}

impl Default for RuleInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleInterpreter {
    pub fn new() -> Self {
        Self {
            number_regex: Regex::new(r"\d+").expect("valid literal regex"),
        }
    }

    /// Parse a message into a command.
    ///
    /// Categories are tested in fixed priority order; only the first matching
    /// keyword is acted on, later keywords in the same message are ignored.
    /// Numbers are maximal digit runs in order of appearance; a run that does
    /// not fit in an `i64` is dropped, so a command whose only number
    /// overflows gets the missing-argument prompt.
    #[instrument(level = "debug", skip(self))]
    pub fn parse(&self, message: &str) -> Result<Command, ParseError> {
        let text = message.to_lowercase();
        let numbers: Vec<i64> = self
            .number_regex
            .find_iter(&text)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();

        if text.contains("height") {
            Ok(Command::Height)
        } else if text.contains("leaf") {
            Ok(Command::Leaves)
        } else if text.contains("insert") {
            match numbers[..] {
                [new_value, parent_value, ..] => Ok(Command::Insert {
                    new_value,
                    parent_value,
                    position: if text.contains("left") {
                        Position::Left
                    } else {
                        Position::Right
                    },
                }),
                _ => Err(ParseError::InsertNeedsValues),
            }
        } else if text.contains("delete") {
            numbers
                .first()
                .map(|&value| Command::Delete { value })
                .ok_or(ParseError::DeleteNeedsValue)
        } else if text.contains("update") || text.contains("change") || text.contains("edit") {
            match numbers[..] {
                [old_value, new_value, ..] => Ok(Command::Update {
                    old_value,
                    new_value,
                }),
                _ => Err(ParseError::UpdateNeedsValues),
            }
        } else if text.contains("search") || text.contains("find") {
            numbers
                .first()
                .map(|&value| Command::Search { value })
                .ok_or(ParseError::SearchNeedsValue)
        } else if text.contains("inorder") {
            Ok(Command::InorderTraversal)
        } else if text.contains("preorder") {
            Ok(Command::PreorderTraversal)
        } else if text.contains("postorder") {
            Ok(Command::PostorderTraversal)
        } else {
            Ok(Command::Unrecognized)
        }
    }

    /// Run one command against the tree and format the golden response.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn execute(&self, tree: &mut BinaryTree, command: Command) -> Reply {
        match command {
            Command::Height => Reply::info(format!(
                "The height of the tree is {}.",
                tree.height()
            )),
            Command::Leaves => Reply::info(format!(
                "Leaf nodes are: {}",
                render_values(&tree.leaves())
            )),
            Command::Insert {
                new_value,
                parent_value,
                position,
            } => {
                if tree.insert(parent_value, new_value, position) {
                    Reply::mutation(format!(
                        "Inserted {} as {} child of {}.",
                        new_value, position, parent_value
                    ))
                } else {
                    Reply::info("Parent node not found.")
                }
            }
            Command::Delete { value } => {
                tree.delete(value);
                Reply::mutation(format!("Deleted node {}.", value))
            }
            Command::Update {
                old_value,
                new_value,
            } => {
                if tree.update(old_value, new_value) {
                    Reply::mutation(format!("Updated node {} to {}.", old_value, new_value))
                } else {
                    Reply::info(format!("Node {} not found.", old_value))
                }
            }
            Command::Search { value } => {
                if tree.contains(value) {
                    Reply::info(format!("\u{2713} Found node {} in the tree.", value))
                } else {
                    Reply::info(format!("\u{2717} Node {} not found in the tree.", value))
                }
            }
            Command::InorderTraversal => Reply::info(format!(
                "Inorder traversal: {}",
                render_values(&tree.inorder())
            )),
            Command::PreorderTraversal => Reply::info(format!(
                "Preorder traversal: {}",
                render_values(&tree.preorder())
            )),
            Command::PostorderTraversal => Reply::info(format!(
                "Postorder traversal: {}",
                render_values(&tree.postorder())
            )),
            Command::Unrecognized => Reply::info(HELP_TEXT),
        }
    }

    /// Parse and execute in one step; missing-argument prompts become the
    /// reply text, never an error.
    pub fn interpret(&self, tree: &mut BinaryTree, message: &str) -> Reply {
        match self.parse(message) {
            Ok(command) => self.execute(tree, command),
            Err(prompt) => Reply::info(prompt.to_string()),
        }
    }
}

/// Render a value sequence the way the chat templates expect: `[5, 10, 15]`.
pub fn render_values(values: &[i64]) -> String {
    format!("[{}]", values.iter().join(", "))
}
