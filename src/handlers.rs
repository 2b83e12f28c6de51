use crate::errors::AppError;
use crate::models::{NewHabitRequest, ToggleRequest, TrackerView};
use crate::state::AppState;
use crate::stats::{date_key, parse_date_key};
use crate::ui::render_index;
use crate::view::build_view;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tokio::task::block_in_place;

// Store mutations write through to disk synchronously, so they run via
// `block_in_place` to keep the runtime's other workers responsive.

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(&build_view(store.habits())))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<TrackerView> {
    let store = state.store.lock().await;
    Json(build_view(store.habits()))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Json<TrackerView> {
    let mut store = state.store.lock().await;
    block_in_place(|| {
        store.add_habit(&payload.name);
    });
    Json(build_view(store.habits()))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<TrackerView>, AppError> {
    let day_key = normalize_day(&payload.date)?;
    let mut store = state.store.lock().await;
    block_in_place(|| store.toggle_date(&id, &day_key));
    Ok(Json(build_view(store.habits())))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<TrackerView> {
    let mut store = state.store.lock().await;
    block_in_place(|| store.delete_habit(&id));
    Json(build_view(store.habits()))
}

/// Always redirects, so the input comes back empty even when the name was rejected.
pub async fn submit_habit(
    State(state): State<AppState>,
    Form(payload): Form<NewHabitRequest>,
) -> Redirect {
    let mut store = state.store.lock().await;
    block_in_place(|| {
        store.add_habit(&payload.name);
    });
    Redirect::to("/")
}

pub async fn submit_toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(payload): Form<ToggleRequest>,
) -> Result<Redirect, AppError> {
    let day_key = normalize_day(&payload.date)?;
    let mut store = state.store.lock().await;
    block_in_place(|| store.toggle_date(&id, &day_key));
    Ok(Redirect::to("/"))
}

pub async fn submit_delete(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let mut store = state.store.lock().await;
    block_in_place(|| store.delete_habit(&id));
    Redirect::to("/")
}

fn normalize_day(value: &str) -> Result<String, AppError> {
    parse_date_key(value)
        .map(date_key)
        .ok_or_else(|| AppError::bad_request("date must be a calendar day formatted YYYY-MM-DD"))
}
