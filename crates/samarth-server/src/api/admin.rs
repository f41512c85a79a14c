//! Admin editor endpoints. Every route here sits behind bearer auth and the
//! rate limiter.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use samarth_core::admin::AdminRow;
use samarth_core::{AdminError, Outcome, ProductForm};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct RowsData {
    edit_slot: Option<usize>,
    rows: Vec<AdminRow>,
}

#[derive(Debug, Serialize)]
pub(super) struct MutationData {
    #[serde(flatten)]
    outcome: Outcome,
    count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct EditData {
    index: usize,
    form: ProductForm,
}

fn map_admin_error(request_id: String, error: &AdminError) -> ApiError {
    let code = match error {
        AdminError::MissingName => "validation_error",
        AdminError::DuplicateId { .. } => "conflict",
        AdminError::IndexOutOfRange { .. } => "not_found",
        AdminError::ConfirmationRequired { .. } => "confirmation_required",
        AdminError::InvalidImport(_) => "bad_request",
        AdminError::ClipboardUnavailable(_) | AdminError::Serialize(_) => {
            tracing::error!(error = %error, "admin operation failed");
            "internal_error"
        }
    };
    ApiError::new(request_id, code, error.to_string())
}

fn still_loading(request_id: String) -> ApiError {
    ApiError::new(
        request_id,
        "loading",
        "Products are still loading. Please try again shortly.",
    )
}

pub(super) async fn list_rows(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<RowsData>> {
    let catalog = state.catalog.read().await;
    let data = RowsData {
        edit_slot: catalog.editor.edit_slot(),
        rows: catalog.editor.rows(),
    };
    drop(catalog);

    Json(ApiResponse::new(data, req_id.0))
}

pub(super) async fn submit_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(form): Json<ProductForm>,
) -> Result<Json<ApiResponse<MutationData>>, ApiError> {
    let mut catalog = state.catalog.write().await;
    if catalog.loading {
        return Err(still_loading(req_id.0));
    }
    let outcome = catalog
        .editor
        .submit(&form)
        .map_err(|e| map_admin_error(req_id.0.clone(), &e))?;
    let count = catalog.editor.products().len();
    drop(catalog);

    Ok(Json(ApiResponse::new(MutationData { outcome, count }, req_id.0)))
}

pub(super) async fn begin_edit(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse<EditData>>, ApiError> {
    let mut catalog = state.catalog.write().await;
    let form = catalog
        .editor
        .begin_edit(index)
        .map_err(|e| map_admin_error(req_id.0.clone(), &e))?;
    drop(catalog);

    Ok(Json(ApiResponse::new(EditData { index, form }, req_id.0)))
}

pub(super) async fn cancel_edit(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<RowsData>> {
    let mut catalog = state.catalog.write().await;
    catalog.editor.cancel_edit();
    let data = RowsData {
        edit_slot: None,
        rows: catalog.editor.rows(),
    };
    drop(catalog);

    Json(ApiResponse::new(data, req_id.0))
}

pub(super) async fn delete_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(index): Path<usize>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<ApiResponse<MutationData>>, ApiError> {
    let mut catalog = state.catalog.write().await;
    if catalog.loading {
        return Err(still_loading(req_id.0));
    }
    let outcome = catalog
        .editor
        .delete(index, params.confirm)
        .map_err(|e| map_admin_error(req_id.0.clone(), &e))?;
    let count = catalog.editor.products().len();
    drop(catalog);

    Ok(Json(ApiResponse::new(MutationData { outcome, count }, req_id.0)))
}

/// The working list as a `products.json` download.
pub(super) async fn export_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let catalog = state.catalog.read().await;
    let export = catalog
        .editor
        .export_json()
        .map_err(|e| map_admin_error(req_id.0.clone(), &e))?;
    drop(catalog);

    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.contents,
    )
        .into_response())
}

/// Replace the working list with the raw JSON request body.
pub(super) async fn import_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: String,
) -> Result<Json<ApiResponse<MutationData>>, ApiError> {
    let mut catalog = state.catalog.write().await;
    if catalog.loading {
        return Err(still_loading(req_id.0));
    }
    let outcome = catalog.editor.import_json(&body).map_err(|e| {
        tracing::warn!(error = ?e, "rejected product import");
        map_admin_error(req_id.0.clone(), &e)
    })?;
    let count = catalog.editor.products().len();
    drop(catalog);

    Ok(Json(ApiResponse::new(MutationData { outcome, count }, req_id.0)))
}

/// Discard all edits and reload the defaults, without reconciliation.
pub(super) async fn reset_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<ApiResponse<MutationData>>, ApiError> {
    if !params.confirm {
        return Err(map_admin_error(
            req_id.0,
            &AdminError::ConfirmationRequired { action: "reset" },
        ));
    }

    if state.catalog.read().await.loading {
        return Err(still_loading(req_id.0));
    }
    let defaults = state.store.fetch_defaults().await;

    let mut catalog = state.catalog.write().await;
    if catalog.loading {
        return Err(still_loading(req_id.0));
    }
    let outcome = catalog
        .editor
        .reset(defaults, true)
        .map_err(|e| map_admin_error(req_id.0.clone(), &e))?;
    let count = catalog.editor.products().len();
    drop(catalog);

    Ok(Json(ApiResponse::new(MutationData { outcome, count }, req_id.0)))
}
