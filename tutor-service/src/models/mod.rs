pub mod chat;
pub mod study;

pub use chat::{ChatMessage, ChatRole, Usage};
pub use study::{CardGroup, Flashcard, Grouping, Quiz};
