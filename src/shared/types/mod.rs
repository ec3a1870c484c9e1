pub mod codec;
pub mod errors;
pub mod pagination;

pub use codec::*;
pub use errors::*;
pub use pagination::*;
