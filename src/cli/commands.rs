//! CLI command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::interpreter::Command;
use crate::cli::args::{Cli, Commands, ConfigCommands, TraversalOrder};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config;
use crate::domain::{BinaryTree, ChatEntry, NodeRepr, Position};
use crate::infrastructure::di::ServiceContainer;

/// Longest chat message accepted at this boundary.
const MAX_MESSAGE_LEN: usize = 1000;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    let selected = cli
        .tree
        .clone()
        .unwrap_or_else(|| container.settings.default_tree.clone());

    match command {
        Commands::Create { name, root } => _create(container, name, *root),
        Commands::List => _list(container),
        Commands::Remove { name } => _remove(container, name),
        Commands::Rename { old, new } => _rename(container, old, new),
        Commands::Reset => _reset(container, &selected),
        Commands::Show => _show(container, &selected),
        Commands::Chat { message } => _chat(container, &selected, &message.join(" ")),
        Commands::History { clear } => _history(container, &selected, *clear),
        Commands::Insert {
            value,
            parent,
            position,
        } => _insert(container, &selected, *value, *parent, *position),
        Commands::Delete { value } => {
            _run_engine_command(container, &selected, Command::Delete { value: *value })
        }
        Commands::Update { old, new } => _run_engine_command(
            container,
            &selected,
            Command::Update {
                old_value: *old,
                new_value: *new,
            },
        ),
        Commands::Search { value } => {
            _run_engine_command(container, &selected, Command::Search { value: *value })
        }
        Commands::Height => _run_engine_command(container, &selected, Command::Height),
        Commands::Leaves => _run_engine_command(container, &selected, Command::Leaves),
        Commands::Traverse { order } => {
            let command = match order {
                TraversalOrder::Inorder => Command::InorderTraversal,
                TraversalOrder::Preorder => Command::PreorderTraversal,
                TraversalOrder::Postorder => Command::PostorderTraversal,
            };
            _run_engine_command(container, &selected, command)
        }
        Commands::Config { command } => _config(container, command),
        Commands::Completion { shell } => {
            generate(*shell, &mut Cli::command(), "treechat", &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(skip(container))]
fn _create(container: &ServiceContainer, name: &str, root: Option<i64>) -> CliResult<()> {
    container.library.create(name, root)?;
    match root {
        Some(value) => output::success(&format!("Created tree '{}' with root {}.", name, value)),
        None => output::success(&format!("Created empty tree '{}'.", name)),
    }
    Ok(())
}

#[instrument(skip(container))]
fn _list(container: &ServiceContainer) -> CliResult<()> {
    let names = container.library.list()?;
    if names.is_empty() {
        output::info("No trees stored.");
        return Ok(());
    }
    for name in names {
        output::info(&name);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _remove(container: &ServiceContainer, name: &str) -> CliResult<()> {
    container.library.remove(name)?;
    output::success(&format!("Removed tree '{}'.", name));
    Ok(())
}

#[instrument(skip(container))]
fn _rename(container: &ServiceContainer, old: &str, new: &str) -> CliResult<()> {
    container.library.rename(old, new)?;
    output::success(&format!("Renamed tree '{}' to '{}'.", old, new));
    Ok(())
}

#[instrument(skip(container))]
fn _reset(container: &ServiceContainer, name: &str) -> CliResult<()> {
    container.library.reset(name)?;
    output::success(&format!("Reset tree '{}'.", name));
    Ok(())
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer, name: &str) -> CliResult<()> {
    let tree = container.library.load_tree(name)?;
    match tree.as_ref().and_then(|t| t.to_repr()) {
        Some(repr) => output::info(&render_node(&repr, "")),
        None => output::info("(empty)"),
    }
    Ok(())
}

fn render_node(repr: &NodeRepr, label: &str) -> termtree::Tree<String> {
    let mut tree = termtree::Tree::new(format!("{}{}", label, repr.value));
    if let Some(left) = &repr.left {
        tree.push(render_node(left, "L "));
    }
    if let Some(right) = &repr.right {
        tree.push(render_node(right, "R "));
    }
    tree
}

#[instrument(skip(container))]
fn _chat(container: &ServiceContainer, name: &str, message: &str) -> CliResult<()> {
    let message = message.trim();
    if message.is_empty() {
        return Err(CliError::Usage("empty chat message".into()));
    }
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(CliError::InvalidArgs(format!(
            "message too long (max {} characters)",
            MAX_MESSAGE_LEN
        )));
    }

    let mut tree = container.library.load_tree(name)?;
    let reply = container.chat.handle(tree.as_mut(), message);
    debug!("reply: {:?}", reply);

    if reply.mutated {
        if let Some(tree) = &tree {
            container.library.save_tree(name, tree)?;
        }
    }
    container.library.append_history(
        name,
        ChatEntry {
            message: message.to_string(),
            response: reply.text.clone(),
        },
    )?;

    output::info(&reply.text);
    Ok(())
}

#[instrument(skip(container))]
fn _history(container: &ServiceContainer, name: &str, clear: bool) -> CliResult<()> {
    if clear {
        container.library.clear_history(name)?;
        output::success(&format!("Cleared chat history of '{}'.", name));
        return Ok(());
    }
    let entries = container.library.history(name)?;
    if entries.is_empty() {
        output::info("No chat history.");
        return Ok(());
    }
    for entry in entries {
        output::header(&format!("> {}", entry.message));
        output::detail(&entry.response);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _insert(
    container: &ServiceContainer,
    name: &str,
    value: i64,
    parent: Option<i64>,
    position: Position,
) -> CliResult<()> {
    let mut tree = container
        .library
        .load_tree(name)?
        .unwrap_or_default();

    match parent {
        None if tree.is_empty() => {
            // Root creation is an orchestration policy, not an engine operation
            tree = BinaryTree::with_root(value);
            container.library.save_tree(name, &tree)?;
            output::success(&format!("Created root {}.", value));
            Ok(())
        }
        None => Err(CliError::Usage(
            "parent value required unless the tree is empty".into(),
        )),
        Some(parent_value) => {
            let reply = container.chat.rules().execute(
                &mut tree,
                Command::Insert {
                    new_value: value,
                    parent_value,
                    position,
                },
            );
            if reply.mutated {
                container.library.save_tree(name, &tree)?;
                output::success(&reply.text);
            } else {
                output::failure(&reply.text);
            }
            Ok(())
        }
    }
}

/// Run one engine command against the selected tree, persisting when mutated.
///
/// An absent stored tree is treated as empty here; chat keeps the distinction,
/// structural commands do not need it.
#[instrument(skip(container))]
fn _run_engine_command(
    container: &ServiceContainer,
    name: &str,
    command: Command,
) -> CliResult<()> {
    let mut tree = container
        .library
        .load_tree(name)?
        .unwrap_or_default();
    let reply = container.chat.rules().execute(&mut tree, command);
    if reply.mutated {
        container.library.save_tree(name, &tree)?;
        output::success(&reply.text);
    } else {
        output::info(&reply.text);
    }
    Ok(())
}

fn _config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = container.settings.to_toml().map_err(CliError::from)?;
            output::info(&rendered);
            Ok(())
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => output::info(&format!("config: {}", path.display())),
                None => output::info("config: <unavailable>"),
            }
            output::info(&format!(
                "data:   {}",
                container.settings.data_file.display()
            ));
            Ok(())
        }
    }
}
