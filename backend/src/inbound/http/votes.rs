//! Restock vote HTTP handlers.
//!
//! ```text
//! POST   /api/v1/votes
//! GET    /api/v1/votes
//! DELETE /api/v1/votes/{voteId}
//! GET    /api/v1/products/{productId}/votes
//! GET    /api/v1/products/{productId}/vote-count
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CancelVoteRequest, CastVoteRequest, Page};
use crate::domain::Vote;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, PageQuery};

/// Request payload for casting a restock vote.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequestBody {
    /// Product the vote is for.
    pub product_id: uuid::Uuid,
}

/// Response payload describing a recorded vote.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponseBody {
    /// The vote's surrogate id, used to cancel it later.
    pub id: uuid::Uuid,
    /// Product the vote is for.
    pub product_id: uuid::Uuid,
    /// Account that cast the vote.
    #[schema(value_type = String, format = "uuid")]
    pub user_id: String,
    /// When the vote was recorded.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Vote> for VoteResponseBody {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id,
            product_id: vote.product_id,
            user_id: vote.user_id.to_string(),
            created_at: vote.created_at.to_rfc3339(),
        }
    }
}

/// Response payload for the live vote count.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteCountResponseBody {
    /// Product the count is for.
    pub product_id: uuid::Uuid,
    /// Current vote count; zero for unknown products.
    pub count: i64,
}

/// Record a restock vote for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/votes",
    request_body = CastVoteRequestBody,
    responses(
        (status = 201, description = "Vote recorded", body = VoteResponseBody),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 409, description = "Vote already recorded", body = crate::domain::Error),
        (status = 503, description = "Service unavailable", body = crate::domain::Error)
    ),
    tags = ["votes"],
    operation_id = "castVote",
    security(("SessionCookie" = []))
)]
#[post("/votes")]
pub async fn cast_vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CastVoteRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;

    let vote = state
        .votes
        .cast_vote(CastVoteRequest {
            product_id: payload.product_id,
            user_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(VoteResponseBody::from(vote)))
}

/// List the authenticated user's own restock votes.
#[utoipa::path(
    get,
    path = "/api/v1/votes",
    params(PageQuery),
    responses(
        (status = 200, description = "The caller's votes", body = [VoteResponseBody]),
        (status = 401, description = "Unauthorized", body = crate::domain::Error)
    ),
    tags = ["votes"],
    operation_id = "listMyVotes",
    security(("SessionCookie" = []))
)]
#[get("/votes")]
pub async fn list_my_votes(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<VoteResponseBody>>> {
    let user_id = session.require_user_id()?;

    let votes = state
        .vote_queries
        .votes_for_user(user_id, Page::from(query.into_inner()))
        .await?;

    Ok(web::Json(
        votes.into_iter().map(VoteResponseBody::from).collect(),
    ))
}

/// List the votes recorded for a product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{productId}/votes",
    params(
        ("productId" = uuid::Uuid, Path, description = "Product identifier"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Votes for the product", body = [VoteResponseBody]),
        (status = 401, description = "Unauthorized", body = crate::domain::Error)
    ),
    tags = ["votes"],
    operation_id = "listProductVotes",
    security(("SessionCookie" = []))
)]
#[get("/products/{product_id}/votes")]
pub async fn list_product_votes(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<VoteResponseBody>>> {
    session.require_user_id()?;

    let votes = state
        .vote_queries
        .votes_for_product(path.into_inner(), Page::from(query.into_inner()))
        .await?;

    Ok(web::Json(
        votes.into_iter().map(VoteResponseBody::from).collect(),
    ))
}

/// Cancel a vote the authenticated user previously cast.
#[utoipa::path(
    delete,
    path = "/api/v1/votes/{voteId}",
    params(("voteId" = uuid::Uuid, Path, description = "The vote's surrogate id")),
    responses(
        (status = 204, description = "Vote cancelled"),
        (status = 401, description = "Unauthorized", body = crate::domain::Error),
        (status = 403, description = "Vote owned by another user", body = crate::domain::Error),
        (status = 404, description = "Vote not found", body = crate::domain::Error)
    ),
    tags = ["votes"],
    operation_id = "cancelVote",
    security(("SessionCookie" = []))
)]
#[delete("/votes/{vote_id}")]
pub async fn cancel_vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<uuid::Uuid>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;

    state
        .votes
        .cancel_vote(CancelVoteRequest {
            vote_id: path.into_inner(),
            requester,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Read the live vote count for a product.
///
/// Public and unauthenticated; counts degrade to the ledger (and finally
/// zero) rather than erroring.
#[utoipa::path(
    get,
    path = "/api/v1/products/{productId}/vote-count",
    params(("productId" = uuid::Uuid, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Current vote count", body = VoteCountResponseBody)
    ),
    tags = ["votes"],
    operation_id = "getVoteCount"
)]
#[get("/products/{product_id}/vote-count")]
pub async fn vote_count(
    state: web::Data<HttpState>,
    path: web::Path<uuid::Uuid>,
) -> ApiResult<web::Json<VoteCountResponseBody>> {
    let product_id = path.into_inner();
    let count = state.vote_queries.vote_count(product_id).await;

    Ok(web::Json(VoteCountResponseBody { product_id, count }))
}

#[cfg(test)]
#[path = "votes_tests.rs"]
mod tests;
