mod service;
mod types;
mod validation;


pub use service::{FineTuningService, FineTuningServiceImpl};
pub use types::{
    FineTuningError, FineTuningEvent, FineTuningEventListResponse, FineTuningJob,
    FineTuningJobRequest, FineTuningJobStatus, HyperparameterValue, Hyperparameters,
};
pub use validation::FineTuningRequestValidator;
