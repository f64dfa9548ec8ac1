//! REST endpoints for cards.
//!
//! `/cards/{id}` is a board id for POST and GET and a card id for DELETE
//! and the like-count PATCH routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::info;

use super::model::{Card, message_fits};
use crate::api::{AppState, body_or_null, required_str};
use crate::boards::Board;
use crate::error::{ApiError, DatabaseError};
use crate::lookup::find_record;
use crate::notify;
use crate::store::Database;

/// Card routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/cards/{id}",
            get(list_cards).post(create_card).delete(delete_card),
        )
        .route("/cards/{id}/increase_likes_count", patch(increase_likes))
        .route("/cards/{id}/decrease_likes_count", patch(decrease_likes))
}

/// Look up a card by raw id, delete it, and return the pre-delete snapshot.
///
/// Shared by `DELETE /cards/{id}` and board deletion.
pub async fn remove_card(db: &dyn Database, raw_id: &str) -> Result<Card, ApiError> {
    let card: Card = find_record(db, raw_id).await?;
    db.delete_card(card.card_id).await?;
    info!(card_id = card.card_id, board_id = card.board_id, "Card deleted");
    Ok(card)
}

/// POST /cards/{board_id}
async fn create_card(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let body = body_or_null(body);
    let message =
        required_str(&body, "message").map_err(|_| ApiError::InvalidData("Invalid data".into()))?;

    let board: Board = find_record(state.db.as_ref(), &board_id).await?;

    if !message_fits(message) {
        return Err(ApiError::MessageTooLong);
    }
    let card = match state.db.insert_card(board.id, message).await {
        Ok(card) => card,
        Err(DatabaseError::Constraint(_)) => return Err(ApiError::MessageTooLong),
        Err(e) => return Err(e.into()),
    };
    info!(card_id = card.card_id, board_id = board.id, "Card created");

    notify::dispatch(Arc::clone(&state.notifier), card.announcement(&board.title));

    Ok((
        StatusCode::CREATED,
        Json(json!({ "card created!": card.message })),
    ))
}

/// GET /cards/{board_id}
///
/// No board existence check: unknown or malformed ids yield `[]`.
async fn list_cards(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let cards = match board_id.trim().parse::<i64>() {
        Ok(id) => state.db.list_cards_for_board(id).await?,
        Err(_) => Vec::new(),
    };
    Ok(Json(Value::Array(cards.iter().map(Card::to_json).collect())))
}

/// PATCH /cards/{card_id}/increase_likes_count
async fn increase_likes(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let card = like(state.db.as_ref(), &card_id, 1).await?;
    Ok(Json(json!({
        "details": format!("Card {} '{}' successfully liked", card.card_id, card.message)
    })))
}

/// PATCH /cards/{card_id}/decrease_likes_count
async fn decrease_likes(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let card = like(state.db.as_ref(), &card_id, -1).await?;
    Ok(Json(json!({
        "details": format!("Card {} '{}' successfully unliked", card.card_id, card.message)
    })))
}

async fn like(db: &dyn Database, raw_id: &str, delta: i64) -> Result<Card, ApiError> {
    let mut card: Card = find_record(db, raw_id).await?;
    db.adjust_likes(card.card_id, delta).await?;
    card.likes_count += delta;
    Ok(card)
}

/// DELETE /cards/{card_id}
async fn delete_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let card = remove_card(state.db.as_ref(), &card_id).await?;
    Ok(Json(json!({
        "details": format!("Card {} '{}' successfully deleted", card.card_id, card.message)
    })))
}
