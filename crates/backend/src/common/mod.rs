mod error;
pub mod metrics;
mod state;

pub use error::ApiError;
pub use state::AppState;
