use axum::{
    extract::{Query, State},
    Extension, Json,
};
use samarth_core::{CatalogQuery, CatalogView, Category, GalleryView};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CatalogParams {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub q: Option<String>,
}

pub(super) async fn catalog_view(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<ApiResponse<CatalogView>>, ApiError> {
    let category = match params.category.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(raw) => raw
            .parse::<Category>()
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?,
        None => Category::default(),
    };
    let query = CatalogQuery::new(category)
        .with_subcategory(params.subcategory.as_deref())
        .with_text(params.q.as_deref());

    let catalog = state.catalog.read().await;
    let view = CatalogView::build(catalog.editor.products(), catalog.loading, &query);
    drop(catalog);

    Ok(Json(ApiResponse::new(view, req_id.0)))
}

pub(super) async fn gallery_view(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<GalleryView>> {
    let catalog = state.catalog.read().await;
    let view = GalleryView::build(catalog.editor.products(), catalog.loading);
    drop(catalog);

    Json(ApiResponse::new(view, req_id.0))
}
