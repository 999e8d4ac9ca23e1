mod hooks;
mod orchestrator;
mod rate_limiter;

pub use hooks::{NoOpHooks, ResilienceHooks, TracingHooks};
pub use orchestrator::{ResilienceConfig, ResilienceOrchestrator};
pub use rate_limiter::RateLimiter;
