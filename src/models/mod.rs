pub mod auth;
pub mod worker;

pub use auth::*;
pub use worker::*;
