use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, Query};
use axum::http::{StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use neeru_errors::Problem;
use serde::Deserialize;
use supply_points_sdk::{SupplyPointDraft, SupplyPointId};
use tracing::field::Empty;

use crate::api::rest::auth::Editor;
use crate::api::rest::dto::{SupplyCardDto, SupplyPointDto, SupplyPointReq};
use crate::api::rest::error::domain_error_to_problem;
use crate::domain::map::MapConfig;
use crate::domain::service::SupplyPointsService;
use crate::domain::viewer::render_board;
use crate::errors::ErrorCode;

type ApiResult<T> = Result<T, Problem>;

fn parse_draft(
    uri: &Uri,
    payload: Result<Json<SupplyPointReq>, JsonRejection>,
) -> ApiResult<SupplyPointDraft> {
    let Json(req) = payload.map_err(|rejection| {
        let trace_id = tracing::Span::current()
            .id()
            .map(|id| id.into_u64().to_string());
        ErrorCode::supply_point_validation_v1().with_context(
            rejection.body_text(),
            uri.path(),
            trace_id,
        )
    })?;
    SupplyPointDraft::try_from(req).map_err(|e| domain_error_to_problem(&e, uri.path()))
}

#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    /// Keep only cards whose coordinates render.
    #[serde(default)]
    pub valid_only: bool,
}

/// Rendered board, the public read path.
#[tracing::instrument(skip_all, fields(valid_only = query.valid_only, cards = Empty))]
pub async fn get_board(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<SupplyPointsService>>,
    Extension(maps): Extension<Arc<MapConfig>>,
    Query(query): Query<BoardQuery>,
) -> ApiResult<Json<Vec<SupplyCardDto>>> {
    let snapshot = svc
        .list()
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    let cards: Vec<SupplyCardDto> = render_board(&snapshot.points, &maps)
        .into_iter()
        .filter(|c| !query.valid_only || c.coordinates_valid)
        .map(Into::into)
        .collect();
    tracing::Span::current().record("cards", cards.len());
    Ok(Json(cards))
}

#[tracing::instrument(skip_all)]
pub async fn list_points(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<SupplyPointsService>>,
) -> ApiResult<Json<Vec<SupplyPointDto>>> {
    let snapshot = svc
        .list()
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(snapshot.points.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip_all, fields(editor = %editor.0.uid))]
pub async fn create_point(
    OriginalUri(uri): OriginalUri,
    editor: Editor,
    Extension(svc): Extension<Arc<SupplyPointsService>>,
    payload: Result<Json<SupplyPointReq>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let draft = parse_draft(&uri, payload)?;
    let point = svc
        .create(&editor.0, draft)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), point.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(SupplyPointDto::from(point)),
    ))
}

#[tracing::instrument(skip_all, fields(editor = %editor.0.uid, id = %id))]
pub async fn replace_point(
    OriginalUri(uri): OriginalUri,
    editor: Editor,
    Extension(svc): Extension<Arc<SupplyPointsService>>,
    Path(id): Path<String>,
    payload: Result<Json<SupplyPointReq>, JsonRejection>,
) -> ApiResult<Json<SupplyPointDto>> {
    let draft = parse_draft(&uri, payload)?;
    let point = svc
        .replace(&editor.0, &SupplyPointId::new(id), draft)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(point.into()))
}

#[tracing::instrument(skip_all, fields(editor = %editor.0.uid, id = %id))]
pub async fn delete_point(
    OriginalUri(uri): OriginalUri,
    editor: Editor,
    Extension(svc): Extension<Arc<SupplyPointsService>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    svc.delete(&SupplyPointId::new(id))
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}
