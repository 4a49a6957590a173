pub mod extractors;
pub mod handlers;
pub mod password;
pub mod service;
pub mod token;

pub use extractors::{AdminUser, AuthUser};
pub use token::TokenService;
