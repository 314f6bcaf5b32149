use std::sync::Arc;

use axum::{Json, extract::State};

use crate::panel::{Panel, PanelView};
use crate::store::KeyValueStore;

pub async fn show<S>(State(panel): State<Arc<Panel<S>>>) -> Json<PanelView>
where
    S: KeyValueStore + Send + 'static,
{
    Json(panel.render().await)
}
