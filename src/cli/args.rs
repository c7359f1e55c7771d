//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::Position;

/// Labeled binary trees driven by structural commands or free-text chat
#[derive(Parser, Debug)]
#[command(name = "treechat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase debug verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Tree to operate on (default from config)
    #[arg(short, long, global = true, env = "TREECHAT_TREE")]
    pub tree: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new labeled tree
    Create {
        /// Tree name
        name: String,
        /// Initial root value
        #[arg(long)]
        root: Option<i64>,
    },

    /// List stored trees
    List,

    /// Remove a stored tree
    Remove {
        /// Tree name
        name: String,
    },

    /// Rename a stored tree
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Reset the selected tree to empty
    Reset,

    /// Render the selected tree
    Show,

    /// Send a free-text message to the interpreter
    Chat {
        /// Message text (words are joined with spaces)
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Show the selected tree's chat transcript
    History {
        /// Clear the transcript instead of showing it
        #[arg(long)]
        clear: bool,
    },

    /// Insert a value under a parent (or create the root of an empty tree)
    Insert {
        /// Value of the new node
        value: i64,
        /// Parent node value; omit to create the root
        parent: Option<i64>,
        /// Child slot (an occupied slot is overwritten)
        #[arg(short, long, default_value = "right")]
        position: Position,
    },

    /// Delete every node with the given value, including its subtree
    Delete {
        /// Value to delete
        value: i64,
    },

    /// Update the first node holding the old value
    Update {
        /// Current value
        old: i64,
        /// New value
        new: i64,
    },

    /// Check whether a value exists in the tree
    Search {
        /// Value to look for
        value: i64,
    },

    /// Print the tree height
    Height,

    /// Print leaf values in left-to-right order
    Leaves,

    /// Print a traversal
    Traverse {
        /// Traversal order
        #[arg(value_enum)]
        order: TraversalOrder,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TraversalOrder {
    Inorder,
    Preorder,
    Postorder,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
