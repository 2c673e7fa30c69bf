//! Prompt construction for each relay task.
//!
//! Builders are pure: the same input always yields the same message
//! sequence. The system message pins the task's output contract; the user
//! message interpolates caller-supplied values into a fixed template.

use crate::models::{ChatMessage, Flashcard};

/// Terms sampled into the description prompt. Caps prompt size for large
/// sets; the card-count line still reports the full set size.
pub const DESCRIPTION_TERM_SAMPLE: usize = 15;

/// Question used when the caller does not ask one.
pub const DEFAULT_EXPLAIN_QUESTION: &str = "Explain this concept in more detail with examples.";

const DEFAULT_SET_TITLE: &str = "Study Set";

pub fn generate_flashcards(text: &str, count: u32) -> Vec<ChatMessage> {
    let system = format!(
        "You are a helpful assistant that creates educational flashcards. \
         Generate exactly {count} flashcards from the provided content. \
         Return ONLY a JSON array with objects containing \"term\" and \"definition\" keys. \
         Make the terms clear questions or key concepts, and definitions should be concise \
         but complete answers. \
         Do not include any markdown formatting or code blocks, just the raw JSON array."
    );

    vec![
        ChatMessage::system(system),
        ChatMessage::user(format!(
            "Create {count} flashcards from this content:\n\n{text}"
        )),
    ]
}

pub fn explain(term: &str, definition: &str, question: Option<&str>) -> Vec<ChatMessage> {
    let question = question.unwrap_or(DEFAULT_EXPLAIN_QUESTION);

    vec![
        ChatMessage::system(
            "You are a helpful tutor explaining concepts to students. \
             Be clear, concise, and use examples when helpful.",
        ),
        ChatMessage::user(format!(
            "The flashcard shows:\nTerm: {term}\nDefinition: {definition}\n\n\
             Student question: {question}"
        )),
    ]
}

pub fn generate_description(title: Option<&str>, flashcards: &[Flashcard]) -> Vec<ChatMessage> {
    let terms_summary = flashcards
        .iter()
        .take(DESCRIPTION_TERM_SAMPLE)
        .map(|card| card.term.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let title = match title {
        Some(title) if !title.is_empty() => title,
        _ => DEFAULT_SET_TITLE,
    };

    vec![
        ChatMessage::system(
            "You are a helpful assistant that writes brief, engaging descriptions for \
             educational flashcard sets. \
             Write a 1-2 sentence description that explains what the set covers and who it \
             might be useful for. \
             Be concise and informative. Do not use quotes or special formatting.",
        ),
        ChatMessage::user(format!(
            "Write a brief description for this flashcard set:\n\
             Title: {title}\n\
             Number of cards: {}\n\
             Sample terms: {terms_summary}",
            flashcards.len()
        )),
    ]
}

const GROUPING_CONTRACT: &str = r#"You are an expert at organizing educational content. Given a list of flashcard terms/questions, group them into logical categories or topics.

Return ONLY a JSON object with this structure:
{
  "groups": [
    {
      "title": "Category Name",
      "description": "Brief description of this category",
      "cardIndices": [0, 1, 2]
    }
  ]
}

Rules:
- Create 2-6 logical groups based on the content
- Each card index should appear in exactly one group
- Use clear, concise category titles
- Order groups from most foundational concepts to more advanced
- Do not include any markdown formatting, just the raw JSON"#;

pub fn group_flashcards(flashcards: &[Flashcard]) -> Vec<ChatMessage> {
    let terms_list = flashcards
        .iter()
        .enumerate()
        .map(|(index, card)| format!("{index}: {}", card.term))
        .collect::<Vec<_>>()
        .join("\n");

    vec![
        ChatMessage::system(GROUPING_CONTRACT),
        ChatMessage::user(format!(
            "Group these flashcard terms into logical categories:\n\n{terms_list}"
        )),
    ]
}

pub fn quiz(term: &str, definition: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a helpful tutor creating quiz questions. Generate a single multiple \
             choice question to test understanding of the concept. \
             Return ONLY a JSON object with these keys: \
             \"question\": the quiz question; \
             \"options\": array of 4 options (a, b, c, d); \
             \"correct\": the letter of the correct answer; \
             \"explanation\": brief explanation of why the answer is correct. \
             Do not include any markdown formatting, just the raw JSON.",
        ),
        ChatMessage::user(format!(
            "Create a quiz question for:\nConcept: {term}\nAnswer: {definition}"
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(term: &str) -> Flashcard {
        Flashcard {
            term: term.to_string(),
            definition: format!("definition of {term}"),
        }
    }

    #[test]
    fn explain_embeds_term_and_definition_verbatim() {
        let messages = explain("Mitosis", "Cell division process", None);
        assert_eq!(messages.len(), 2);
        let user = &messages[1].content;
        assert!(user.contains("Mitosis"));
        assert!(user.contains("Cell division process"));
        assert!(user.contains(DEFAULT_EXPLAIN_QUESTION));
    }

    #[test]
    fn explain_uses_caller_question_when_present() {
        let messages = explain("Osmosis", "Diffusion of water", Some("Why does it matter?"));
        let user = &messages[1].content;
        assert!(user.contains("Why does it matter?"));
        assert!(!user.contains(DEFAULT_EXPLAIN_QUESTION));
    }

    #[test]
    fn flashcards_prompt_carries_count_and_source_text() {
        let messages = generate_flashcards("The cell is the basic unit of life.", 7);
        assert!(messages[0].content.contains("exactly 7 flashcards"));
        assert!(messages[1]
            .content
            .contains("The cell is the basic unit of life."));
    }

    #[test]
    fn description_samples_only_the_first_fifteen_terms() {
        let cards: Vec<Flashcard> = (1..=20).map(|i| card(&format!("alpha-{i:02}"))).collect();
        let messages = generate_description(Some("Biology 101"), &cards);
        let user = &messages[1].content;
        assert!(user.contains("Biology 101"));
        assert!(user.contains("Number of cards: 20"));
        assert!(user.contains("alpha-15"));
        assert!(!user.contains("alpha-16"));
    }

    #[test]
    fn description_defaults_title_when_absent() {
        let cards = vec![card("alpha")];
        let messages = generate_description(None, &cards);
        assert!(messages[1].content.contains("Title: Study Set"));
    }

    #[test]
    fn grouping_enumerates_every_card_index() {
        let cards = vec![card("alpha"), card("beta"), card("gamma")];
        let messages = group_flashcards(&cards);
        let user = &messages[1].content;
        assert!(user.contains("0: alpha"));
        assert!(user.contains("1: beta"));
        assert!(user.contains("2: gamma"));
    }

    #[test]
    fn quiz_prompt_names_concept_and_answer() {
        let messages = quiz("Photosynthesis", "Converts light into chemical energy");
        let user = &messages[1].content;
        assert!(user.contains("Concept: Photosynthesis"));
        assert!(user.contains("Answer: Converts light into chemical energy"));
    }
}
