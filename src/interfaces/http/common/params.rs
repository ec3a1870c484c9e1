//! Query/path parameters shared by list endpoints

use serde::Deserialize;
use utoipa::IntoParams;

use super::error::ApiError;
use crate::domain::DomainError;
use crate::shared::query::params::{page_request, parse_number};
use crate::shared::types::{PageRequest, PaginationSettings};

/// `page` / `limit`, kept as text so bad values come back as a
/// validation error in the usual envelope.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Items per page (default 10, at most 100)
    pub limit: Option<String>,
}

impl PageParams {
    pub fn to_request(&self, settings: PaginationSettings) -> Result<PageRequest, ApiError> {
        Ok(page_request(
            self.page.as_deref(),
            self.limit.as_deref(),
            settings,
        )?)
    }
}

pub fn path_id(raw: &str) -> Result<i64, ApiError> {
    parse_number::<i64>("id", Some(raw))?
        .ok_or_else(|| DomainError::validation("id must not be empty").into())
}
