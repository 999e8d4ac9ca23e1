//! Error response fixtures

use serde_json::json;

/// Sample 401 authentication error response
pub fn error_401_invalid_api_key() -> serde_json::Value {
    json!({
        "error": {
            "message": "Incorrect API key provided: invalid_key.",
            "type": "invalid_request_error",
            "param": null,
            "code": "invalid_api_key"
        }
    })
}

/// Sample 429 rate limit error response
pub fn error_429_rate_limit() -> serde_json::Value {
    json!({
        "error": {
            "message": "Rate limit reached for requests",
            "type": "requests",
            "param": null,
            "code": "rate_limit_exceeded"
        }
    })
}

/// Sample 429 quota exceeded error response
pub fn error_429_quota_exceeded() -> serde_json::Value {
    json!({
        "error": {
            "message": "You exceeded your current quota, please check your plan and billing details.",
            "type": "insufficient_quota",
            "param": null,
            "code": "insufficient_quota"
        }
    })
}

/// Sample 503 service unavailable error response
pub fn error_503_service_unavailable() -> serde_json::Value {
    json!({
        "error": {
            "message": "The engine is currently overloaded, please try again later.",
            "type": "server_error",
            "param": null,
            "code": null
        }
    })
}

/// Sample 400 for an unsupported fine-tuning base model
pub fn error_400_invalid_model() -> serde_json::Value {
    json!({
        "error": {
            "message": "Model gpt-0 is not available for fine-tuning or does not exist.",
            "type": "invalid_request_error",
            "param": "model",
            "code": "model_not_available"
        }
    })
}

/// Sample 404 not found error response
pub fn error_404_not_found() -> serde_json::Value {
    json!({
        "error": {
            "message": "No such File object: file-missing",
            "type": "invalid_request_error",
            "param": "id",
            "code": null
        }
    })
}
