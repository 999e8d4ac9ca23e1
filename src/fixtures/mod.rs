//! Canned API payloads shared by the unit tests.

#[cfg(test)]
mod chat_fixtures;
#[cfg(test)]
mod error_fixtures;
#[cfg(test)]
mod fine_tuning_fixtures;

#[cfg(test)]
pub use chat_fixtures::*;
#[cfg(test)]
pub use error_fixtures::*;
#[cfg(test)]
pub use file_fixtures::*;
#[cfg(test)]
pub use fine_tuning_fixtures::*;
