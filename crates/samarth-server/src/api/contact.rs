use axum::{
    extract::{Query, State},
    Extension, Json,
};
use samarth_contact::{Delivery, DeliveryError};
use samarth_core::contact::prefill as prefill_for;
use samarth_core::{ContactForm, ContactPrefill};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PrefillParams {
    pub product_id: Option<String>,
    pub id: Option<String>,
}

/// Form values for `?productId=` (or `?id=`); `null` when nothing resolves.
pub(super) async fn prefill(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<PrefillParams>,
) -> Json<ApiResponse<Option<ContactPrefill>>> {
    let wanted = params.product_id.or(params.id).unwrap_or_default();

    let catalog = state.catalog.read().await;
    let data = prefill_for(catalog.editor.products(), &wanted);
    drop(catalog);

    Json(ApiResponse::new(data, req_id.0))
}

pub(super) async fn submit(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ApiResponse<Delivery>>, ApiError> {
    match state.contact.deliver(&form).await {
        Ok(delivery) => Ok(Json(ApiResponse::new(delivery, req_id.0))),
        Err(e @ DeliveryError::Invalid(_)) => Err(ApiError::new(
            req_id.0,
            "validation_error",
            e.user_message(),
        )),
        Err(e) => {
            tracing::error!(error = %e, "contact delivery failed");
            Err(ApiError::new(req_id.0, "upstream_error", e.user_message()))
        }
    }
}
