use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::panel::Panel;
use crate::store::KeyValueStore;

pub mod panel;
pub mod pins;

pub fn router<S>(state: Arc<Panel<S>>) -> Router
where
    S: KeyValueStore + Send + 'static,
{
    Router::new()
        .route("/panel", get(panel::show::<S>))
        .route("/pins/{handle}", post(pins::toggle::<S>))
        .with_state(state)
}
