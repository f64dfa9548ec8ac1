//! Card data model.

use serde::{Deserialize, Serialize};

/// Maximum card message length, in characters. The store enforces the
/// same limit with a CHECK constraint.
pub const MAX_MESSAGE_CHARS: usize = 40;

/// Whether `message` fits on a card: at most [`MAX_MESSAGE_CHARS`]
/// characters and no NUL.
pub fn message_fits(message: &str) -> bool {
    !message.contains('\0') && message.chars().count() <= MAX_MESSAGE_CHARS
}

/// A short message pinned to a board, with a like counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub card_id: i64,
    pub message: String,
    /// No floor; unliking past zero goes negative.
    pub likes_count: i64,
    pub board_id: i64,
}

impl Card {
    /// Plain key-value representation used in API responses.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "card_id": self.card_id,
            "message": self.message,
            "likes_count": self.likes_count,
            "board_id": self.board_id,
        })
    }

    /// Text posted to the chat channel when this card lands on `board_title`.
    pub fn announcement(&self, board_title: &str) -> String {
        format!(
            "New card '{}' added to Inspiration Board '{}'!",
            self.message, board_title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_card() -> Card {
        Card {
            card_id: 9,
            message: "Keep going".into(),
            likes_count: -2,
            board_id: 1,
        }
    }

    #[test]
    fn to_json_fields() {
        let json = make_card().to_json();
        assert_eq!(json["card_id"], 9);
        assert_eq!(json["message"], "Keep going");
        assert_eq!(json["likes_count"], -2);
        assert_eq!(json["board_id"], 1);
    }

    #[test]
    fn message_fits_counts_characters_and_refuses_nul() {
        assert!(message_fits(&"a".repeat(MAX_MESSAGE_CHARS)));
        assert!(message_fits(&"é".repeat(MAX_MESSAGE_CHARS)));
        assert!(message_fits(""));
        assert!(!message_fits(&"a".repeat(MAX_MESSAGE_CHARS + 1)));
        assert!(!message_fits("ok\0"));
    }

    #[test]
    fn announcement_text() {
        assert_eq!(
            make_card().announcement("Motivation"),
            "New card 'Keep going' added to Inspiration Board 'Motivation'!"
        );
    }
}
