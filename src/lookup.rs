//! Record lookup: resolve a raw path id to a stored entity.

use async_trait::async_trait;

use crate::boards::model::Board;
use crate::cards::model::Card;
use crate::error::{ApiError, DatabaseError};
use crate::store::Database;

/// An entity that can be fetched by integer id.
#[async_trait]
pub trait Record: Sized + Send {
    /// Lowercase entity name used in error messages.
    const KIND: &'static str;

    async fn fetch(db: &dyn Database, id: i64) -> Result<Option<Self>, DatabaseError>;
}

#[async_trait]
impl Record for Board {
    const KIND: &'static str = "board";

    async fn fetch(db: &dyn Database, id: i64) -> Result<Option<Self>, DatabaseError> {
        db.get_board(id).await
    }
}

#[async_trait]
impl Record for Card {
    const KIND: &'static str = "card";

    async fn fetch(db: &dyn Database, id: i64) -> Result<Option<Self>, DatabaseError> {
        db.get_card(id).await
    }
}

/// Parse a path id as a positive integer.
pub fn parse_id(kind: &'static str, raw: &str) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidIdentifier {
            kind,
            raw: raw.to_string(),
        }),
    }
}

/// Parse `raw` and load the matching record.
///
/// Fails with `InvalidIdentifier` (400) for a non-integer id and
/// `NotFound` (404) when no row has that id.
pub async fn find_record<R: Record>(db: &dyn Database, raw: &str) -> Result<R, ApiError> {
    let id = parse_id(R::KIND, raw)?;
    R::fetch(db, id)
        .await?
        .ok_or(ApiError::NotFound { kind: R::KIND, id })
}
