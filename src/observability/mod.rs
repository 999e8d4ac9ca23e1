mod logging;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
