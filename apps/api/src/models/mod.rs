pub mod application;
pub mod job;
pub mod saved_job;
pub mod user;
