//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;

pub use arena::{BinaryTree, Node, Position};
pub use entities::{ChatEntry, NodeRepr, TreeRecord};
pub use error::DomainError;
