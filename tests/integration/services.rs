//! Service calls through the real transport

use crate::support::*;
use openai_finetune_classifier::errors::{AuthenticationError, RateLimitError};
use openai_finetune_classifier::prelude::*;
use openai_finetune_classifier::{FilePurpose, FileUploadRequest, FineTuningJobStatus};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_chat_completion_sends_model_and_messages() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "/chat/completions")
        .and(body_partial_json(json!({
            "model": "ft:gpt-3.5-turbo-0613:org::_ft_0",
            "temperature": 0.0,
            "max_tokens": 500
        })))
        .respond_with(success_response(chat_completion("basic")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let request = ChatCompletionRequest::new(
        "ft:gpt-3.5-turbo-0613:org::_ft_0",
        vec![ChatMessage::system("Classify."), ChatMessage::user("Abstract: x\n\nClass: ")],
    )
    .with_temperature(0.0)
    .with_max_tokens(500);

    let response = client.chat().create(request).await.unwrap();
    assert_eq!(response.first_content(), Some("basic"));
}

#[tokio::test]
async fn test_upload_sends_fine_tune_purpose() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "/files")
        .respond_with(success_response(file_object("file-abc", "train.jsonl")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let file = client
        .files()
        .upload(FileUploadRequest::new(
            b"{}\n".to_vec(),
            "train.jsonl",
            FilePurpose::FineTune,
        ))
        .await
        .unwrap();

    assert_eq!(file.id, "file-abc");
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"purpose\""));
    assert!(body.contains("fine-tune"));
}

#[tokio::test]
async fn test_events_pass_limit_query() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/fine_tuning/jobs/ftjob-1/events")
        .and(query_param("limit", "100"))
        .respond_with(success_response(events(&["Fine-tuning job started"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let page = client
        .fine_tuning()
        .events("ftjob-1", Some(100), None)
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].message, "Fine-tuning job started");
}

#[tokio::test]
async fn test_invalid_api_key_maps_to_authentication_error() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/fine_tuning/jobs/ftjob-1"))
        .respond_with(error_response(401, "Incorrect API key provided", Some("invalid_api_key")))
        .mount(&server)
        .await;

    let client = client_for(&server, 2);
    let err = client.fine_tuning().retrieve("ftjob-1").await.unwrap_err();

    assert!(matches!(
        err,
        OpenAIError::Authentication(AuthenticationError::InvalidApiKey(_))
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/fine_tuning/jobs/ftjob-1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fine_tuning/jobs/ftjob-1"))
        .respond_with(success_response(job("ftjob-1", "running", None)))
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let job = client.fine_tuning().retrieve("ftjob-1").await.unwrap();

    assert_eq!(job.status, FineTuningJobStatus::Running);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_service_unavailable_carries_retry_after() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/fine_tuning/jobs/ftjob-1"))
        .respond_with(ResponseTemplate::new(503).insert_header("retry-after", "0"))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let err = client.fine_tuning().retrieve("ftjob-1").await.unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.retry_after(), Some(std::time::Duration::ZERO));
}

#[tokio::test]
async fn test_quota_exceeded_is_not_retried() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/fine_tuning/jobs"))
        .respond_with(error_response(
            429,
            "You exceeded your current quota",
            Some("insufficient_quota"),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let err = client
        .fine_tuning()
        .create(FineTuningJobRequest::new("gpt-3.5-turbo", "file-train"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OpenAIError::RateLimit(RateLimitError::QuotaExceeded(_))
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
