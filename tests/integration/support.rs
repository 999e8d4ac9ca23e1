use openai_finetune_classifier::pipeline::{write_table, CellValue, Table};
use openai_finetune_classifier::{
    OpenAIClient, OpenAIClientBuilder, OpenAIConfig, ResilienceConfig, ResilienceOrchestrator,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "sk-integration";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock that only matches requests carrying the test credentials
pub fn mock_with_auth(method_matcher: &str, path_matcher: &str) -> wiremock::MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
}

pub fn success_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn error_response(status: u16, message: &str, code: Option<&str>) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "param": null,
            "code": code
        }
    }))
}

/// Client pointed at `server` with short retry delays
pub fn client_for(server: &MockServer, max_retries: u32) -> Arc<dyn OpenAIClient> {
    let config = OpenAIConfig::new(API_KEY)
        .with_base_url_str(&server.uri())
        .expect("mock server uri is a valid url")
        .with_max_retries(max_retries);

    let resilience = ResilienceOrchestrator::new(ResilienceConfig {
        max_retries,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        multiplier: 2.0,
        jitter: false,
    });

    OpenAIClientBuilder::new()
        .with_config(config)
        .with_resilience(Arc::new(resilience))
        .build()
        .expect("Failed to build client")
}

pub fn file_object(id: &str, filename: &str) -> Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 1024,
        "created_at": 1692661014,
        "filename": filename,
        "purpose": "fine-tune",
        "status": "processed"
    })
}

pub fn job(id: &str, status: &str, fine_tuned_model: Option<&str>) -> Value {
    json!({
        "id": id,
        "object": "fine_tuning.job",
        "model": "gpt-3.5-turbo-0613",
        "created_at": 1692661014,
        "finished_at": null,
        "fine_tuned_model": fine_tuned_model,
        "status": status,
        "training_file": "file-train",
        "validation_file": "file-valid",
        "result_files": [],
        "error": {}
    })
}

/// Event page, newest first
pub fn events(messages: &[&str]) -> Value {
    let data: Vec<Value> = messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            json!({
                "id": format!("ftevent-{}", messages.len() - i),
                "object": "fine_tuning.job.event",
                "created_at": 1692661100 - i as i64,
                "level": "info",
                "message": message,
                "type": "message"
            })
        })
        .collect();
    json!({ "object": "list", "data": data, "has_more": false })
}

pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-integration",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "ft:gpt-3.5-turbo-0613:org::_ft_0",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 1, "total_tokens": 121 }
    })
}

pub fn write_dataset(dir: &Path, name: &str, rows: &[(&str, &str)]) {
    let table = Table::new(name, vec!["Abstract".to_string(), "Class".to_string()]).with_rows(
        rows.iter()
            .map(|(text, class)| vec![CellValue::from(*text), CellValue::from(*class)])
            .collect(),
    );
    write_table(&table, &dir.join(name)).expect("Failed to write dataset");
}
