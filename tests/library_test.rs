//! Tests for the tree library over a real JSON file store

use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use treechat::application::services::TreeLibrary;
use treechat::application::ApplicationError;
use treechat::domain::{BinaryTree, ChatEntry, Position};
use treechat::infrastructure::store::JsonFileStore;

struct LibraryFixture {
    library: TreeLibrary,
    // Keeps the temp dir alive for the duration of the test
    _dir: TempDir,
}

#[fixture]
fn fixture() -> LibraryFixture {
    let dir = TempDir::new().expect("create temp dir");
    let store = JsonFileStore::new(dir.path().join("trees.json"));
    LibraryFixture {
        library: TreeLibrary::new(Arc::new(store)),
        _dir: dir,
    }
}

#[rstest]
fn given_missing_store_file_when_listing_then_library_is_empty(fixture: LibraryFixture) {
    assert!(fixture.library.list().unwrap().is_empty());
}

#[rstest]
fn given_created_trees_when_listing_then_names_are_sorted(fixture: LibraryFixture) {
    fixture.library.create("zeta", None).unwrap();
    fixture.library.create("alpha", Some(1)).unwrap();

    assert_eq!(fixture.library.list().unwrap(), vec!["alpha", "zeta"]);
}

#[rstest]
fn given_existing_name_when_creating_then_already_exists_error(fixture: LibraryFixture) {
    fixture.library.create("main", None).unwrap();

    let err = fixture.library.create("main", Some(7)).unwrap_err();
    assert!(matches!(err, ApplicationError::TreeAlreadyExists(name) if name == "main"));
}

#[rstest]
fn given_unknown_name_when_removing_then_not_found_error(fixture: LibraryFixture) {
    let err = fixture.library.remove("ghost").unwrap_err();
    assert!(matches!(err, ApplicationError::TreeNotFound(name) if name == "ghost"));
}

#[rstest]
fn given_existing_tree_when_removing_then_it_is_gone(fixture: LibraryFixture) {
    fixture.library.create("main", Some(1)).unwrap();
    fixture.library.remove("main").unwrap();

    assert!(fixture.library.list().unwrap().is_empty());
}

#[rstest]
fn given_rename_when_loading_then_contents_and_transcript_survive(fixture: LibraryFixture) {
    fixture.library.create("old", Some(7)).unwrap();
    fixture
        .library
        .append_history(
            "old",
            ChatEntry {
                message: "height?".to_string(),
                response: "The height of the tree is 1.".to_string(),
            },
        )
        .unwrap();

    fixture.library.rename("old", "new").unwrap();

    assert_eq!(fixture.library.list().unwrap(), vec!["new"]);
    let tree = fixture.library.load_tree("new").unwrap().expect("has root");
    assert_eq!(tree.preorder(), vec![7]);
    assert_eq!(fixture.library.history("new").unwrap().len(), 1);
}

#[rstest]
fn given_rename_onto_existing_name_when_renaming_then_already_exists_error(
    fixture: LibraryFixture,
) {
    fixture.library.create("a", None).unwrap();
    fixture.library.create("b", None).unwrap();

    let err = fixture.library.rename("a", "b").unwrap_err();
    assert!(matches!(err, ApplicationError::TreeAlreadyExists(name) if name == "b"));
}

#[rstest]
fn given_reset_when_loading_then_tree_is_empty_but_transcript_kept(fixture: LibraryFixture) {
    fixture.library.create("main", Some(10)).unwrap();
    fixture
        .library
        .append_history(
            "main",
            ChatEntry {
                message: "hi".to_string(),
                response: "help".to_string(),
            },
        )
        .unwrap();

    fixture.library.reset("main").unwrap();

    assert!(fixture.library.load_tree("main").unwrap().is_none());
    assert_eq!(fixture.library.history("main").unwrap().len(), 1);
}

#[rstest]
fn given_saved_tree_when_loading_then_structure_round_trips(fixture: LibraryFixture) {
    fixture.library.create("main", None).unwrap();

    let mut tree = BinaryTree::with_root(10);
    assert!(tree.insert(10, 5, Position::Left));
    assert!(tree.insert(10, 15, Position::Right));
    fixture.library.save_tree("main", &tree).unwrap();

    let loaded = fixture.library.load_tree("main").unwrap().expect("stored");
    assert_eq!(loaded, tree);
}

#[rstest]
fn given_empty_tree_when_saving_then_loads_back_as_none(fixture: LibraryFixture) {
    fixture.library.create("main", Some(1)).unwrap();

    fixture.library.save_tree("main", &BinaryTree::new()).unwrap();

    assert!(fixture.library.load_tree("main").unwrap().is_none());
}

#[rstest]
fn given_unknown_name_when_loading_then_not_found_error(fixture: LibraryFixture) {
    let err = fixture.library.load_tree("ghost").unwrap_err();
    assert!(matches!(err, ApplicationError::TreeNotFound(name) if name == "ghost"));
}

#[rstest]
fn given_transcript_when_appending_and_clearing_then_order_and_emptiness_hold(
    fixture: LibraryFixture,
) {
    fixture.library.create("main", None).unwrap();
    for i in 0..3 {
        fixture
            .library
            .append_history(
                "main",
                ChatEntry {
                    message: format!("msg {i}"),
                    response: format!("reply {i}"),
                },
            )
            .unwrap();
    }

    let history = fixture.library.history("main").unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].message, "msg 0");
    assert_eq!(history[2].response, "reply 2");

    fixture.library.clear_history("main").unwrap();
    assert!(fixture.library.history("main").unwrap().is_empty());
}
