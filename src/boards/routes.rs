//! REST endpoints for boards.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::info;

use super::model::Board;
use crate::api::{AppState, MissingKey, body_or_null, required_str};
use crate::cards;
use crate::error::ApiError;
use crate::lookup::find_record;

/// Board routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/boards", get(list_boards).post(create_board))
        .route(
            "/boards/{id}",
            get(get_board).put(replace_board).delete(delete_board),
        )
}

/// POST /boards
async fn create_board(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let body = body_or_null(body);
    let invalid = |_| ApiError::InvalidData("Invalid data".into());
    let title = required_str(&body, "title").map_err(invalid)?;
    let owner = required_str(&body, "owner").map_err(invalid)?;

    let board = state.db.insert_board(title, owner).await?;
    info!(board_id = board.id, title = %board.title, "Board created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "board created!": board.title })),
    ))
}

/// GET /boards
async fn list_boards(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let boards = state.db.list_boards().await?;
    Ok(Json(Value::Array(
        boards.iter().map(Board::to_json).collect(),
    )))
}

/// GET /boards/{id}
async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let board: Board = find_record(state.db.as_ref(), &id).await?;
    Ok(Json(json!({ "board": board.to_json() })))
}

/// PUT /boards/{id}
///
/// Both `title` and `owner` must be present; the error names the first
/// missing key.
async fn replace_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut board: Board = find_record(state.db.as_ref(), &id).await?;

    let body = body_or_null(body);
    let missing = |k: MissingKey| ApiError::InvalidData(format!("Missing key: '{}'", k.0));
    let title = required_str(&body, "title").map_err(missing)?;
    let owner = required_str(&body, "owner").map_err(missing)?;

    state.db.update_board(board.id, title, owner).await?;
    board.title = title.to_string();
    board.owner = owner.to_string();
    info!(board_id = board.id, "Board replaced");

    Ok(Json(json!({ "board": board.to_json() })))
}

/// DELETE /boards/{id}
///
/// Cards go first, each through the regular card delete path.
async fn delete_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let board: Board = find_record(state.db.as_ref(), &id).await?;

    for card_id in &board.card_ids {
        cards::routes::remove_card(state.db.as_ref(), &card_id.to_string()).await?;
    }
    state.db.delete_board(board.id).await?;
    info!(board_id = board.id, cards = board.card_ids.len(), "Board deleted");

    Ok(Json(json!({
        "details": format!("Board {} '{}' successfully deleted", board.id, board.title)
    })))
}
