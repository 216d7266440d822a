use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::api::rest::auth::EditorTokens;
use crate::api::rest::handlers;
use crate::domain::map::MapConfig;
use crate::domain::service::SupplyPointsService;

pub const BASE_PATH: &str = "/supply-points/v1";

/// Public board and editor write routes.
pub fn router(service: Arc<SupplyPointsService>, maps: MapConfig, tokens: EditorTokens) -> Router {
    let routes = Router::new()
        .route("/board", get(handlers::get_board))
        .route(
            "/points",
            get(handlers::list_points).post(handlers::create_point),
        )
        .route(
            "/points/{id}",
            axum::routing::put(handlers::replace_point).delete(handlers::delete_point),
        )
        .layer(Extension(service))
        .layer(Extension(Arc::new(maps)))
        .layer(Extension(tokens));

    Router::new().nest(BASE_PATH, routes)
}
