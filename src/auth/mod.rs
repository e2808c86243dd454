// Authentication module
// Provides user registration, login with JWT issuance, and the generic
// user update used by the PATCH /user/:email route

pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, register_handler, update_user_handler};
pub use models::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role, UpdateReport,
    UpdateUserRequest, UpdateUserResponse, User, UserResponse,
};
pub use service::AuthService;
pub use token::{Claims, TokenService};
