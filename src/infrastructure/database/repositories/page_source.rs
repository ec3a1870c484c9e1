//! `PageSource` over a SeaORM `Select`

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, Select};

use super::db_error::db_err;
use crate::domain::DomainResult;
use crate::shared::query::PageSource;

/// A filtered and ordered `Select`. Counting and fetching both clone the
/// same statement, so they always agree on the predicate.
pub struct SelectSource<'a, E: EntityTrait> {
    db: &'a DatabaseConnection,
    select: Select<E>,
}

impl<'a, E: EntityTrait> SelectSource<'a, E> {
    pub fn new(db: &'a DatabaseConnection, select: Select<E>) -> Self {
        Self { db, select }
    }
}

#[async_trait]
impl<'a, E> PageSource for SelectSource<'a, E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    type Row = E::Model;

    async fn count(&self) -> DomainResult<u64> {
        self.select.clone().count(self.db).await.map_err(db_err)
    }

    async fn fetch(&self, offset: u64, limit: u64) -> DomainResult<Vec<E::Model>> {
        self.select
            .clone()
            .offset(offset)
            .limit(limit)
            .all(self.db)
            .await
            .map_err(db_err)
    }
}
