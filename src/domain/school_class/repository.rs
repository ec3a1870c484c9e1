//! Class repository interface

use async_trait::async_trait;

use super::model::{ClassChanges, ClassFilter, NewClass, SchoolClass};
use crate::domain::DomainResult;
use crate::shared::types::{PageEnvelope, PageRequest};

#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Classes matching `filter`, ordered by name then id.
    async fn list(
        &self,
        filter: &ClassFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<SchoolClass>>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<SchoolClass>>;
    async fn find_by_name_and_year(
        &self,
        name: &str,
        academic_year: &str,
    ) -> DomainResult<Option<SchoolClass>>;
    async fn course_exists(&self, course_id: i64) -> DomainResult<bool>;
    async fn create(&self, class: NewClass) -> DomainResult<SchoolClass>;
    async fn update(&self, id: i64, changes: ClassChanges) -> DomainResult<Option<SchoolClass>>;
    async fn delete(&self, id: i64) -> DomainResult<bool>;
}
