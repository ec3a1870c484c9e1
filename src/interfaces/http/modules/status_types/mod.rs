//! Status-type catalogue: the code tables behind every coded column

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
