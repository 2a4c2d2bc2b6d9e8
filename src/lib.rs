pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::errors::ApiError;
pub use frameworks::config::ClientConfig;
pub use frameworks::runtime::{build_client, run};
pub use interface_adapters::ApiClient;
pub use use_cases::session::SessionManager;
