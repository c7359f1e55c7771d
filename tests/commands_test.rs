//! Tests for CLI command dispatch boundaries

use rstest::{fixture, rstest};
use tempfile::TempDir;

use treechat::cli::args::{Cli, Commands};
use treechat::cli::commands::execute_command;
use treechat::cli::error::CliError;
use treechat::config::Settings;
use treechat::infrastructure::di::ServiceContainer;

struct CliFixture {
    container: ServiceContainer,
    _dir: TempDir,
}

#[fixture]
fn fixture() -> CliFixture {
    let dir = TempDir::new().expect("create temp dir");
    let settings = Settings {
        data_file: dir.path().join("trees.json"),
        default_tree: "main".to_string(),
    };
    let container = ServiceContainer::new(settings);
    container.library.create("main", Some(10)).unwrap();
    CliFixture {
        container,
        _dir: dir,
    }
}

fn chat_cli(message: String) -> Cli {
    Cli {
        debug: 0,
        tree: None,
        command: Some(Commands::Chat {
            message: vec![message],
        }),
    }
}

#[rstest]
fn given_blank_chat_message_when_executing_then_usage_error(fixture: CliFixture) {
    let err = execute_command(&chat_cli("   ".to_string()), &fixture.container).unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
}

#[rstest]
fn given_message_at_character_limit_when_executing_then_it_is_accepted(fixture: CliFixture) {
    // 1000 two-byte characters: within the limit when counted as chars,
    // over it when counted as bytes
    let message = "é".repeat(1000);
    execute_command(&chat_cli(message.clone()), &fixture.container).unwrap();

    let history = fixture.container.library.history("main").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, message);
}

#[rstest]
fn given_message_over_character_limit_when_executing_then_it_is_rejected(fixture: CliFixture) {
    let err =
        execute_command(&chat_cli("é".repeat(1001)), &fixture.container).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgs(_)));

    assert!(fixture.container.library.history("main").unwrap().is_empty());
}
