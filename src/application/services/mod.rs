pub mod chat;
pub mod library;

pub use chat::ChatService;
pub use library::TreeLibrary;
