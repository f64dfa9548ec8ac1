//! libSQL backend: async `Database` trait implementation.
//!
//! Supports local file and in-memory databases.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::boards::model::Board;
use crate::cards::model::Card;
use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::Database;

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to enable foreign keys: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Card ids on one board, ascending.
    async fn card_ids_for(&self, board_id: i64) -> Result<Vec<i64>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT card_id FROM cards WHERE board_id = ?1 ORDER BY card_id",
                params![board_id],
            )
            .await
            .map_err(|e| DatabaseError::from_libsql("card_ids_for", e))?;

        let mut ids = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::from_libsql("card_ids_for row", e))?
        {
            ids.push(
                row.get::<i64>(0)
                    .map_err(|e| DatabaseError::Query(format!("card_ids_for row parse: {e}")))?,
            );
        }
        Ok(ids)
    }
}

// ── Helper functions ────────────────────────────────────────────────

const BOARD_COLUMNS: &str = "id, title, owner";

const CARD_COLUMNS: &str = "card_id, message, likes_count, board_id";

/// Map a libsql Row to a Board (without card ids).
///
/// Column order matches BOARD_COLUMNS.
fn row_to_board(row: &libsql::Row) -> Result<Board, libsql::Error> {
    Ok(Board::new(row.get(0)?, row.get::<String>(1)?, row.get::<String>(2)?))
}

/// Map a libsql Row to a Card.
///
/// Column order matches CARD_COLUMNS.
fn row_to_card(row: &libsql::Row) -> Result<Card, libsql::Error> {
    Ok(Card {
        card_id: row.get(0)?,
        message: row.get(1)?,
        likes_count: row.get(2)?,
        board_id: row.get(3)?,
    })
}

// ── Trait implementation ────────────────────────────────────────────

#[async_trait]
impl Database for LibSqlBackend {
    async fn init_schema(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    // ── Boards ──────────────────────────────────────────────────────

    async fn insert_board(&self, title: &str, owner: &str) -> Result<Board, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("INSERT INTO boards (title, owner) VALUES (?1, ?2) RETURNING {BOARD_COLUMNS}"),
                params![title, owner],
            )
            .await
            .map_err(|e| DatabaseError::from_libsql("insert_board", e))?;

        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::from_libsql("insert_board", e))?
            .ok_or_else(|| DatabaseError::Query("insert_board: no row returned".into()))?;
        let board = row_to_board(&row)
            .map_err(|e| DatabaseError::Query(format!("insert_board row parse: {e}")))?;

        debug!(board_id = board.id, title = %board.title, "Board inserted into DB");
        Ok(board)
    }

    async fn get_board(&self, id: i64) -> Result<Option<Board>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {BOARD_COLUMNS} FROM boards WHERE id = ?1"),
                params![id],
            )
            .await
            .map_err(|e| DatabaseError::from_libsql("get_board", e))?;

        let board = match rows.next().await {
            Ok(Some(row)) => row_to_board(&row)
                .map_err(|e| DatabaseError::Query(format!("get_board row parse: {e}")))?,
            Ok(None) => return Ok(None),
            Err(e) => return Err(DatabaseError::from_libsql("get_board", e)),
        };

        let card_ids = self.card_ids_for(board.id).await?;
        Ok(Some(board.with_card_ids(card_ids)))
    }

    async fn list_boards(&self) -> Result<Vec<Board>, DatabaseError> {
        let conn = self.conn();

        // Two queries total: boards, then every (board_id, card_id) pair.
        let mut card_ids: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut rows = conn
            .query("SELECT board_id, card_id FROM cards ORDER BY card_id", ())
            .await
            .map_err(|e| DatabaseError::from_libsql("list_boards cards", e))?;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::from_libsql("list_boards cards row", e))?
        {
            let board_id: i64 = row
                .get(0)
                .map_err(|e| DatabaseError::Query(format!("list_boards row parse: {e}")))?;
            let card_id: i64 = row
                .get(1)
                .map_err(|e| DatabaseError::Query(format!("list_boards row parse: {e}")))?;
            card_ids.entry(board_id).or_default().push(card_id);
        }

        let mut rows = conn
            .query(&format!("SELECT {BOARD_COLUMNS} FROM boards ORDER BY id"), ())
            .await
            .map_err(|e| DatabaseError::from_libsql("list_boards", e))?;

        let mut boards = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::from_libsql("list_boards row", e))?
        {
            let board = row_to_board(&row)
                .map_err(|e| DatabaseError::Query(format!("list_boards row parse: {e}")))?;
            let ids = card_ids.remove(&board.id).unwrap_or_default();
            boards.push(board.with_card_ids(ids));
        }
        Ok(boards)
    }

    async fn update_board(&self, id: i64, title: &str, owner: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "UPDATE boards SET title = ?1, owner = ?2 WHERE id = ?3",
                params![title, owner, id],
            )
            .await
            .map_err(|e| DatabaseError::from_libsql("update_board", e))?;

        debug!(board_id = id, "Board updated in DB");
        Ok(())
    }

    async fn delete_board(&self, id: i64) -> Result<bool, DatabaseError> {
        let count = self
            .conn()
            .execute("DELETE FROM boards WHERE id = ?1", params![id])
            .await
            .map_err(|e| DatabaseError::from_libsql("delete_board", e))?;
        Ok(count > 0)
    }

    // ── Cards ───────────────────────────────────────────────────────

    async fn insert_card(&self, board_id: i64, message: &str) -> Result<Card, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("INSERT INTO cards (message, board_id) VALUES (?1, ?2) RETURNING {CARD_COLUMNS}"),
                params![message, board_id],
            )
            .await
            .map_err(|e| DatabaseError::from_libsql("insert_card", e))?;

        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::from_libsql("insert_card", e))?
            .ok_or_else(|| DatabaseError::Query("insert_card: no row returned".into()))?;
        let card = row_to_card(&row)
            .map_err(|e| DatabaseError::Query(format!("insert_card row parse: {e}")))?;

        debug!(card_id = card.card_id, board_id, "Card inserted into DB");
        Ok(card)
    }

    async fn get_card(&self, id: i64) -> Result<Option<Card>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {CARD_COLUMNS} FROM cards WHERE card_id = ?1"),
                params![id],
            )
            .await
            .map_err(|e| DatabaseError::from_libsql("get_card", e))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let card = row_to_card(&row)
                    .map_err(|e| DatabaseError::Query(format!("get_card row parse: {e}")))?;
                Ok(Some(card))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::from_libsql("get_card", e)),
        }
    }

    async fn list_cards_for_board(&self, board_id: i64) -> Result<Vec<Card>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {CARD_COLUMNS} FROM cards WHERE board_id = ?1 ORDER BY card_id"),
                params![board_id],
            )
            .await
            .map_err(|e| DatabaseError::from_libsql("list_cards_for_board", e))?;

        let mut cards = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::from_libsql("list_cards_for_board row", e))?
        {
            cards.push(
                row_to_card(&row).map_err(|e| {
                    DatabaseError::Query(format!("list_cards_for_board row parse: {e}"))
                })?,
            );
        }
        Ok(cards)
    }

    async fn adjust_likes(&self, id: i64, delta: i64) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "UPDATE cards SET likes_count = likes_count + ?1 WHERE card_id = ?2",
                params![delta, id],
            )
            .await
            .map_err(|e| DatabaseError::from_libsql("adjust_likes", e))?;

        debug!(card_id = id, delta, "Card likes adjusted in DB");
        Ok(())
    }

    async fn delete_card(&self, id: i64) -> Result<bool, DatabaseError> {
        let count = self
            .conn()
            .execute("DELETE FROM cards WHERE card_id = ?1", params![id])
            .await
            .map_err(|e| DatabaseError::from_libsql("delete_card", e))?;
        Ok(count > 0)
    }
}
