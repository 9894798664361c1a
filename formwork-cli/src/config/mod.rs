mod loader;
mod types;

pub use loader::{ConfigError, ConfigLoader};
pub use types::FormworkConfig;
