//! OpenAPI documentation configuration.
//!
//! Registers every REST endpoint and payload schema of the restock
//! coordination API. The generated specification feeds Swagger UI in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::stock::{StockUpdateResponseBody, UpdateStockRequestBody};
use crate::inbound::http::subscriptions::{SubscribeRequestBody, SubscriptionResponseBody};
use crate::inbound::http::votes::{CastVoteRequestBody, VoteCountResponseBody, VoteResponseBody};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the storefront's login flow.",
            ))),
        );
    }
}

/// OpenAPI document for the restock coordination REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Storefront restock coordination API",
        description = "Restock votes, subscriptions, vote counts, stock updates, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::votes::cast_vote,
        crate::inbound::http::votes::list_my_votes,
        crate::inbound::http::votes::cancel_vote,
        crate::inbound::http::votes::vote_count,
        crate::inbound::http::votes::list_product_votes,
        crate::inbound::http::subscriptions::subscribe,
        crate::inbound::http::subscriptions::list_my_subscriptions,
        crate::inbound::http::subscriptions::unsubscribe,
        crate::inbound::http::subscriptions::list_product_subscriptions,
        crate::inbound::http::stock::update_stock,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        CastVoteRequestBody,
        VoteResponseBody,
        VoteCountResponseBody,
        SubscribeRequestBody,
        SubscriptionResponseBody,
        UpdateStockRequestBody,
        StockUpdateResponseBody,
        crate::domain::Error,
        crate::domain::ErrorCode,
    )),
    tags(
        (name = "votes", description = "Restock vote ledger and live counts"),
        (name = "subscriptions", description = "Restock notification subscriptions"),
        (name = "stock", description = "Inventory stock updates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
