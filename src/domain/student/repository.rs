//! Student repository interface

use async_trait::async_trait;

use super::model::{NewStudent, Student, StudentChanges, StudentFilter};
use crate::domain::DomainResult;
use crate::shared::types::{PageEnvelope, PageRequest};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Students matching `filter`, ordered by full name then id.
    async fn list(
        &self,
        filter: &StudentFilter,
        page: PageRequest,
    ) -> DomainResult<PageEnvelope<Student>>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Student>>;
    async fn find_by_process_number(&self, process_number: &str) -> DomainResult<Option<Student>>;
    async fn create(&self, student: NewStudent) -> DomainResult<Student>;
    async fn update(&self, id: i64, changes: StudentChanges) -> DomainResult<Option<Student>>;
    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i64) -> DomainResult<bool>;
}
