//! Repository access for the application layer

use super::report::ReportRepository;
use super::school_class::ClassRepository;
use super::student::StudentRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let student = repos.students().find_by_id(7).await?;
///     let page = repos.reports().financial_report(&filter, request).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn students(&self) -> &dyn StudentRepository;
    fn classes(&self) -> &dyn ClassRepository;
    fn reports(&self) -> &dyn ReportRepository;
}
