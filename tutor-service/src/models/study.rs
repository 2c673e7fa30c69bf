use serde::{Deserialize, Serialize};

/// A single study card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

/// Topic grouping produced by the group-flashcards task.
///
/// The model is asked to place every card index in exactly one group; that
/// invariant is trusted, not validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grouping {
    pub groups: Vec<CardGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGroup {
    pub title: String,
    pub description: String,
    pub card_indices: Vec<u32>,
}

/// Multiple-choice quiz question for a single card. The `correct` letter is
/// passed through as the model emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
    pub explanation: String,
}
