//! Chat completion fixtures

use serde_json::json;

/// Completion whose single choice classifies an abstract
pub fn chat_completion_response() -> serde_json::Value {
    chat_completion_with_content("applied")
}

pub fn chat_completion_with_content(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "ft:gpt-3.5-turbo-0613:org::_ft_0",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 84,
            "completion_tokens": 1,
            "total_tokens": 85
        }
    })
}

/// A choice whose message has no content
pub fn chat_completion_without_content() -> serde_json::Value {
    json!({
        "id": "chatcmpl-124",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "ft:gpt-3.5-turbo-0613:org::_ft_0",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null
            },
            "finish_reason": "content_filter"
        }]
    })
}

pub fn chat_completion_without_choices() -> serde_json::Value {
    json!({
        "id": "chatcmpl-125",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "ft:gpt-3.5-turbo-0613:org::_ft_0",
        "choices": []
    })
}
