use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use findmy_model::{AuthResponse, CreateItemRequest, Item, LoginRequest, RegisterRequest};

use crate::{auth::Owner, error::AppError, state::SharedState};

pub async fn login_handler(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(response))
}

pub async fn register_handler(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = state
        .auth
        .register(
            &payload.name,
            &payload.email,
            &payload.password,
            payload.phone_number,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_items_handler(
    State(state): State<SharedState>,
    Owner(owner_id): Owner,
) -> Json<Vec<Item>> {
    Json(state.store.list(&owner_id).await)
}

pub async fn create_item_handler(
    State(state): State<SharedState>,
    Owner(owner_id): Owner,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let item = state
        .store
        .create(&owner_id, &payload.name, &payload.kind)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn ring_item_handler(
    State(state): State<SharedState>,
    Owner(owner_id): Owner,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let item = state.store.ring(&id, &owner_id).await?;
    Ok(Json(item))
}

pub async fn delete_item_handler(
    State(state): State<SharedState>,
    Owner(owner_id): Owner,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.remove(&id, &owner_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
