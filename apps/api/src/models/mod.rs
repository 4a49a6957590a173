pub mod application;
pub mod input;
pub mod job;
pub mod user;
