//! Test fixtures and factory functions for creating test data.

use wordwise_core::{Vocabulary, VocabularyEntry};

pub fn entry(id: i64, original: &str, target: &str) -> VocabularyEntry {
    VocabularyEntry {
        id,
        original: original.to_string(),
        target: target.to_string(),
        example: None,
    }
}

/// Spanish has enough words for full prompts; german has a single word and
/// can never build distractors.
pub fn vocabulary() -> Vocabulary {
    Vocabulary::from_lists([
        (
            "spanish",
            vec![
                VocabularyEntry {
                    example: Some("El perro ladra.".to_string()),
                    ..entry(1, "dog", "perro")
                },
                entry(2, "house", "casa"),
                entry(3, "cat", "gato"),
                entry(4, "water", "agua"),
            ],
        ),
        ("german", vec![entry(1, "dog", "Hund")]),
    ])
}

/// Correct target for each spanish item id.
pub fn spanish_target(item_id: i64) -> &'static str {
    match item_id {
        1 => "perro",
        2 => "casa",
        3 => "gato",
        4 => "agua",
        _ => panic!("no spanish item {}", item_id),
    }
}
