// Use cases layer: session lifecycle, degrade policy and job polling.

pub mod fallback;
pub mod poll_job;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use fallback::{Fallback, FallbackContext, fallback_for};
pub use poll_job::{PollError, PollJobUseCase, PollPolicy};
pub use session::{Persistence, SessionManager};
