//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod session;
pub mod state;
pub mod stock;
pub mod subscriptions;
#[cfg(test)]
pub mod test_utils;
pub mod votes;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::Page;

pub use error::ApiResult;

/// Pagination query parameters shared by the listing endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Maximum rows to return; defaults to 50, capped at 200.
    pub limit: Option<i64>,
    /// Rows to skip before the first returned row.
    pub offset: Option<i64>,
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Page::new(query.limit, query.offset)
    }
}
