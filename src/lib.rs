//! treechat: labeled binary trees driven by structural commands or free-text chat
//!
//! Layering (inner to outer): `domain` holds the arena-backed binary tree and
//! its serialized shape; `application` holds the rule-based interpreter and
//! the chat/library services; `infrastructure` implements the I/O boundary
//! traits (JSON store, DI container); `cli` is the user-facing surface.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
