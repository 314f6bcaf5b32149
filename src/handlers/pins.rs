use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::panel::Panel;
use crate::store::KeyValueStore;

pub async fn toggle<S>(
    State(panel): State<Arc<Panel<S>>>,
    Path(handle): Path<String>,
) -> Result<Json<Value>, AppError>
where
    S: KeyValueStore + Send + 'static,
{
    let pinned = panel.toggle_pin(&handle).await?;
    Ok(Json(json!({ "handle": handle, "pinned": pinned })))
}
