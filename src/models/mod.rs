pub mod auth;
pub mod workshop;

pub use auth::{AccessToken, Credentials, LoginResponse, TokenBundle, User, UserRole};
pub use workshop::{ModerationAction, Workshop, WorkshopSchedule};
