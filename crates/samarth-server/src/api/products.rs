use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use samarth_core::DetailView;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

/// Detail page for one product. Unknown ids answer 404 with the not-found
/// view, which carries the link back to the catalog.
pub(super) async fn product_detail(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let catalog = state.catalog.read().await;
    let view = DetailView::build(catalog.editor.products(), &id, catalog.loading);
    drop(catalog);

    let status = match view {
        DetailView::NotFound { .. } => {
            tracing::debug!(%id, "product not found");
            StatusCode::NOT_FOUND
        }
        DetailView::Loading | DetailView::Found(_) => StatusCode::OK,
    };
    (status, Json(ApiResponse::new(view, req_id.0)))
}
