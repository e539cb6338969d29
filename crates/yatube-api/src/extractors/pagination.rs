//! Page selection extractor
//!
//! Reads the raw `page` query parameter. It is never rejected here: the
//! paginator maps anything unusable to a valid page.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

/// The `?page=` value exactly as sent, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParam(pub Option<String>);

impl PageParam {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageParam
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(mut params)| params.remove("page"));

        Ok(PageParam(page))
    }
}
