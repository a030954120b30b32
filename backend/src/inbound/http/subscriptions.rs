//! Restock subscription HTTP handlers.
//!
//! ```text
//! POST   /api/v1/subscriptions
//! GET    /api/v1/subscriptions
//! DELETE /api/v1/subscriptions/{subscriptionId}
//! GET    /api/v1/products/{productId}/subscriptions
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{Page, SubscribeRequest, UnsubscribeRequest};
use crate::domain::RestockSubscription;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, PageQuery};

/// Request payload for subscribing to a product's restock.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequestBody {
    /// Product to watch.
    pub product_id: uuid::Uuid,
}

/// Response payload describing a subscription.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponseBody {
    /// The subscription's surrogate id, used to unsubscribe later.
    pub id: uuid::Uuid,
    /// Product being watched.
    pub product_id: uuid::Uuid,
    /// Account that subscribed.
    #[schema(value_type = String, format = "uuid")]
    pub user_id: String,
    /// Whether the next-restock notification has been delivered.
    pub delivered: bool,
    /// When the subscription was created.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<RestockSubscription> for SubscriptionResponseBody {
    fn from(subscription: RestockSubscription) -> Self {
        Self {
            id: subscription.id,
            product_id: subscription.product_id,
            user_id: subscription.user_id.to_string(),
            delivered: subscription.delivered,
            created_at: subscription.created_at.to_rfc3339(),
        }
    }
}

/// Subscribe the authenticated user to a product's next restock.
///
/// An already delivered subscription is reopened rather than duplicated;
/// only an active one conflicts.
#[utoipa::path(
    post,
    path = "/api/v1/subscriptions",
    request_body = SubscribeRequestBody,
    responses(
        (status = 201, description = "Subscription active", body = SubscriptionResponseBody),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 409, description = "Already subscribed", body = crate::domain::Error),
        (status = 503, description = "Service unavailable", body = crate::domain::Error)
    ),
    tags = ["subscriptions"],
    operation_id = "subscribe",
    security(("SessionCookie" = []))
)]
#[post("/subscriptions")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubscribeRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;

    let subscription = state
        .subscriptions
        .subscribe(SubscribeRequest {
            product_id: payload.product_id,
            user_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(SubscriptionResponseBody::from(subscription)))
}

/// List the authenticated user's subscriptions, delivered or not.
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    params(PageQuery),
    responses(
        (status = 200, description = "The caller's subscriptions", body = [SubscriptionResponseBody]),
        (status = 401, description = "Unauthorized", body = crate::domain::Error)
    ),
    tags = ["subscriptions"],
    operation_id = "listMySubscriptions",
    security(("SessionCookie" = []))
)]
#[get("/subscriptions")]
pub async fn list_my_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<SubscriptionResponseBody>>> {
    let user_id = session.require_user_id()?;

    let subscriptions = state
        .subscription_queries
        .subscriptions_for_user(user_id, Page::from(query.into_inner()))
        .await?;

    Ok(web::Json(
        subscriptions
            .into_iter()
            .map(SubscriptionResponseBody::from)
            .collect(),
    ))
}

/// List every subscription watching a product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{productId}/subscriptions",
    params(
        ("productId" = uuid::Uuid, Path, description = "Product identifier"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Subscriptions for the product", body = [SubscriptionResponseBody]),
        (status = 401, description = "Unauthorized", body = crate::domain::Error)
    ),
    tags = ["subscriptions"],
    operation_id = "listProductSubscriptions",
    security(("SessionCookie" = []))
)]
#[get("/products/{product_id}/subscriptions")]
pub async fn list_product_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<SubscriptionResponseBody>>> {
    session.require_user_id()?;

    let subscriptions = state
        .subscription_queries
        .subscriptions_for_product(path.into_inner(), Page::from(query.into_inner()))
        .await?;

    Ok(web::Json(
        subscriptions
            .into_iter()
            .map(SubscriptionResponseBody::from)
            .collect(),
    ))
}

/// Remove a subscription the authenticated user owns.
#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/{subscriptionId}",
    params((
        "subscriptionId" = uuid::Uuid,
        Path,
        description = "The subscription's surrogate id"
    )),
    responses(
        (status = 204, description = "Subscription removed"),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 403, description = "Owned by another user", body = crate::domain::Error),
        (status = 404, description = "Subscription not found", body = crate::domain::Error)
    ),
    tags = ["subscriptions"],
    operation_id = "unsubscribe",
    security(("SessionCookie" = []))
)]
#[delete("/subscriptions/{subscription_id}")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;

    state
        .subscriptions
        .unsubscribe(UnsubscribeRequest {
            subscription_id: path.into_inner(),
            requester,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "subscriptions_tests.rs"]
mod tests;
