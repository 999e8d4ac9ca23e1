//! Test doubles for the transport and auth seams.
//!
//! Services and the pipeline are exercised against these instead of a live
//! endpoint. Responses are queued up front and requests are recorded so tests
//! can assert on what was sent.

#[cfg(test)]
mod mock_auth;
#[cfg(test)]
mod mock_transport;

#[cfg(test)]
pub use mock_auth::MockAuthManager;
#[cfg(test)]
pub use mock_transport::{MockHttpTransport, MockRequest};
