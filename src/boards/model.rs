//! Board data model.

use serde::{Deserialize, Serialize};

/// An inspiration board: a titled, owned collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: i64,
    pub title: String,
    pub owner: String,
    /// Ids of the cards on this board, in creation order.
    pub card_ids: Vec<i64>,
}

impl Board {
    pub fn new(id: i64, title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            owner: owner.into(),
            card_ids: Vec::new(),
        }
    }

    pub fn with_card_ids(mut self, card_ids: Vec<i64>) -> Self {
        self.card_ids = card_ids;
        self
    }

    /// Plain key-value representation used in API responses.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "owner": self.owner,
            "card_ids": self.card_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_json_lists_card_ids() {
        let board = Board::new(3, "Motivation", "Ada").with_card_ids(vec![1, 4]);
        let json = board.to_json();
        assert_eq!(json["id"], 3);
        assert_eq!(json["title"], "Motivation");
        assert_eq!(json["owner"], "Ada");
        assert_eq!(json["card_ids"], serde_json::json!([1, 4]));
    }

    #[test]
    fn serde_shape_matches_to_json() {
        let board = Board::new(1, "t", "o");
        assert_eq!(serde_json::to_value(&board).unwrap(), board.to_json());
    }
}
