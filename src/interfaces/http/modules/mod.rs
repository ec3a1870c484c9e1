pub mod classes;
pub mod health;
pub mod metrics;
pub mod reports;
pub mod request_id;
pub mod status_types;
pub mod students;
