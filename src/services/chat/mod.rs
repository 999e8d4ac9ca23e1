mod service;
mod types;
mod validation;


pub use service::{ChatCompletionService, ChatCompletionServiceImpl};
pub use types::{
    ChatCompletionChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ChatMessageRole, Usage,
};
pub use validation::ChatRequestValidator;
