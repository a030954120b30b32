//! Stock update HTTP handlers.
//!
//! ```text
//! PUT /api/v1/products/{productId}/stock
//! ```
//!
//! The inventory entry point for the restock subsystem. Authorisation of
//! inventory staff belongs to the storefront's admin gateway; this adapter
//! only requires an authenticated session.

use actix_web::{put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::StockUpdateOutcome;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for setting a product's stock level.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockRequestBody {
    /// New absolute stock quantity; must not be negative.
    pub quantity: i32,
}

/// Response payload describing a committed stock update.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdateResponseBody {
    /// Product that was updated.
    pub product_id: uuid::Uuid,
    /// Stock level before the update.
    pub previous: i32,
    /// Stock level after the update.
    pub current: i32,
    /// Whether this update was a restock (zero to positive) and triggered
    /// the notification pipeline.
    pub restocked: bool,
}

impl From<StockUpdateOutcome> for StockUpdateResponseBody {
    fn from(outcome: StockUpdateOutcome) -> Self {
        Self {
            product_id: outcome.change.product_id,
            previous: outcome.change.previous,
            current: outcome.change.current,
            restocked: outcome.restocked,
        }
    }
}

/// Set a product's stock level.
#[utoipa::path(
    put,
    path = "/api/v1/products/{productId}/stock",
    params(("productId" = uuid::Uuid, Path, description = "Product identifier")),
    request_body = UpdateStockRequestBody,
    responses(
        (status = 200, description = "Stock updated", body = StockUpdateResponseBody),
        (status = 400, description = "Negative quantity", body = crate::domain::Error),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 404, description = "Product not found", body = crate::domain::Error)
    ),
    tags = ["stock"],
    operation_id = "updateStock",
    security(("SessionCookie" = []))
)]
#[put("/products/{product_id}/stock")]
pub async fn update_stock(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
    payload: web::Json<UpdateStockRequestBody>,
) -> ApiResult<web::Json<StockUpdateResponseBody>> {
    session.require_user_id()?;

    let outcome = state
        .stock
        .update_stock(path.into_inner(), payload.quantity)
        .await?;

    Ok(web::Json(StockUpdateResponseBody::from(outcome)))
}

#[cfg(test)]
#[path = "stock_tests.rs"]
mod tests;
