pub mod handlers;
pub mod scorer;
pub mod service;
