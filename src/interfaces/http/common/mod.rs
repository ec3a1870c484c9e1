//! Building blocks shared by every HTTP module

pub mod error;
pub mod params;
pub mod response;
pub mod validated_json;

pub use error::{ApiError, ApiResult};
pub use params::{path_id, PageParams};
pub use response::{ApiResponse, PageMetaDto, PaginatedData};
pub use validated_json::ValidatedJson;
