pub mod directory;
pub mod export;
pub mod jwt;
pub mod session;

pub use directory::{DirectoryError, WorkerDirectory};
pub use jwt::JwtService;
pub use session::{AdminSessions, AuthError};
