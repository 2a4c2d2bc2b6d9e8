// Domain layer: wire types, the endpoint table, errors and ports.

pub mod assets;
pub mod auth;
pub mod billing;
pub mod endpoint;
pub mod errors;
pub mod jobs;
pub mod ports;
pub mod settings;

pub use auth::{Quota, User};
pub use endpoint::Endpoint;
pub use errors::ApiError;
pub use jobs::{JobReport, JobState};
pub use ports::{Clock, JobTracker, SessionStore};
