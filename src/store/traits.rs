//! Backend-agnostic `Database` trait for boards and cards.

use async_trait::async_trait;

use crate::boards::model::Board;
use crate::cards::model::Card;
use crate::error::DatabaseError;

/// Async persistence interface. Handlers receive it as `Arc<dyn Database>`.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run all pending schema migrations.
    async fn init_schema(&self) -> Result<(), DatabaseError>;

    // ── Boards ──────────────────────────────────────────────────────

    /// Insert a new board and return it with its assigned id.
    async fn insert_board(&self, title: &str, owner: &str) -> Result<Board, DatabaseError>;

    /// Get a board (with its card ids) by id.
    async fn get_board(&self, id: i64) -> Result<Option<Board>, DatabaseError>;

    /// All boards, ordered by id.
    async fn list_boards(&self) -> Result<Vec<Board>, DatabaseError>;

    /// Overwrite a board's title and owner.
    async fn update_board(&self, id: i64, title: &str, owner: &str) -> Result<(), DatabaseError>;

    /// Delete a board row. Cards must already be gone.
    /// Returns `false` if no such board existed.
    async fn delete_board(&self, id: i64) -> Result<bool, DatabaseError>;

    // ── Cards ───────────────────────────────────────────────────────

    /// Insert a card on `board_id`. A message over the length limit
    /// fails with `DatabaseError::Constraint`.
    async fn insert_card(&self, board_id: i64, message: &str) -> Result<Card, DatabaseError>;

    /// Get a card by id.
    async fn get_card(&self, id: i64) -> Result<Option<Card>, DatabaseError>;

    /// Cards on a board, ordered by card id.
    async fn list_cards_for_board(&self, board_id: i64) -> Result<Vec<Card>, DatabaseError>;

    /// Add `delta` to a card's like counter.
    async fn adjust_likes(&self, id: i64, delta: i64) -> Result<(), DatabaseError>;

    /// Delete a card. Returns `false` if no such card existed.
    async fn delete_card(&self, id: i64) -> Result<bool, DatabaseError>;
}
