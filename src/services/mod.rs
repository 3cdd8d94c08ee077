pub mod error;
pub mod http;
pub mod api_client;
pub mod auth_service;
pub mod workshop_service;

pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use api_client::ApiClient;
pub use auth_service::AuthService;
pub use workshop_service::WorkshopService;

#[cfg(target_arch = "wasm32")]
pub use http::GlooTransport;
