// Authentication module
// Email/password registration and login with a single bound session token per user

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{current_handler, logout_handler, signin_handler, signup_handler};
pub use middleware::AuthenticatedUser;
pub use models::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse};
pub use service::AuthService;
