//! A complete trial against the mock API

use crate::support::*;
use openai_finetune_classifier::pipeline::{read_jsonl, read_table, ConversationRecord};
use openai_finetune_classifier::prelude::*;
use openai_finetune_classifier::TrialPaths;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, query_param};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

const MODEL_ID: &str = "ft:gpt-3.5-turbo-0613:org::_ft_0";

/// Picks the file id from the uploaded file name
struct UploadResponder;

impl Respond for UploadResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = String::from_utf8_lossy(&request.body);
        if body.contains("tmp_class_finetune_training_0.jsonl") {
            success_response(file_object("file-train", "tmp_class_finetune_training_0.jsonl"))
        } else {
            success_response(file_object("file-valid", "tmp_class_finetune_validation_0.jsonl"))
        }
    }
}

/// Answers "applied" for abstracts that mention engineering
struct ClassifierResponder;

impl Respond for ClassifierResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = request.body_json().unwrap_or_default();
        let prompt = body["messages"][1]["content"].as_str().unwrap_or_default();
        let label = if prompt.contains("engine") { "applied" } else { "basic" };
        success_response(chat_completion(label))
    }
}

async fn mount_training(server: &MockServer) {
    mock_with_auth("POST", "/files")
        .respond_with(UploadResponder)
        .expect(2)
        .mount(server)
        .await;

    mock_with_auth("POST", "/fine_tuning/jobs")
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "training_file": "file-train",
            "validation_file": "file-valid",
            "suffix": "_ft_0"
        })))
        .respond_with(success_response(job("ftjob-1", "validating_files", None)))
        .expect(1)
        .mount(server)
        .await;

    // First scan: still running
    mock_with_auth("GET", "/fine_tuning/jobs/ftjob-1/events")
        .and(query_param("limit", "100"))
        .respond_with(success_response(events(&["Fine-tuning job started"])))
        .up_to_n_times(1)
        .mount(server)
        .await;
    mock_with_auth("GET", "/fine_tuning/jobs/ftjob-1/events")
        .respond_with(success_response(events(&[
            "The job has successfully completed",
            "Step 10/10: training loss=0.01",
            "Fine-tuning job started",
        ])))
        .mount(server)
        .await;

    mock_with_auth("GET", "/fine_tuning/jobs/ftjob-1")
        .respond_with(success_response(job("ftjob-1", "running", None)))
        .up_to_n_times(1)
        .mount(server)
        .await;
    mock_with_auth("GET", "/fine_tuning/jobs/ftjob-1")
        .respond_with(success_response(job("ftjob-1", "succeeded", Some(MODEL_ID))))
        .mount(server)
        .await;
}

fn setup_data(dir: &TempDir) -> PipelineConfig {
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();

    write_dataset(
        &data,
        "training_0.xlsx",
        &[("A jet engine test rig.", "applied"), ("Knot invariants.", "basic")],
    );
    write_dataset(&data, "valid_0.xlsx", &[("Diesel engine wear.", "applied")]);
    write_dataset(
        &data,
        "test_set.xlsx",
        &[
            ("Rocket engine cooling.", "applied"),
            ("Prime gaps.", "basic"),
            ("Field trial of a vaccine.", "applied"),
            ("Quantum vacuum.", "basic"),
        ],
    );

    PipelineConfig::new()
        .with_data_dir(data)
        .with_output_dir(dir.path().join("out"))
        .with_poll_interval(Duration::from_millis(10))
        .with_max_polls(Some(10))
        .with_pacing(Pacing::None)
}

#[tokio::test]
async fn test_trial_end_to_end() {
    let server = setup_mock_server().await;
    mount_training(&server).await;
    mock_with_auth("POST", "/chat/completions")
        .and(body_partial_json(json!({ "model": MODEL_ID })))
        .respond_with(ClassifierResponder)
        .expect(4)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = setup_data(&dir);
    let client = client_for(&server, 0);

    let report = run_trial(client.as_ref(), &config, 0).await.unwrap();

    assert_eq!(report.job_id.as_deref(), Some("ftjob-1"));
    assert_eq!(report.model_id, MODEL_ID);
    assert_eq!(report.accuracy, 0.75);
    assert_eq!(report.rows, 4);

    let paths = TrialPaths::new(&config.data_dir, &config.output_dir, 0);
    assert_eq!(std::fs::read_to_string(&paths.model_id_file).unwrap(), MODEL_ID);

    let validation: Vec<ConversationRecord> = read_jsonl(&paths.validation_jsonl).unwrap();
    assert_eq!(validation.len(), 1);
    assert_eq!(
        validation[0].messages[1].content(),
        Some("Abstract: Diesel engine wear.\n\nClass: ")
    );

    let results = read_table(&paths.results).unwrap();
    assert_eq!(results.headers(), &["Abstract", "Class", "Results", "Match"]);
    let accuracy = read_table(&paths.accuracy_results).unwrap();
    assert_eq!(accuracy.len(), 4);
    assert_eq!(accuracy.column_index("Accuracy"), Some(4));
}

#[tokio::test]
async fn test_trial_stops_on_failed_job() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "/files")
        .respond_with(UploadResponder)
        .mount(&server)
        .await;
    mock_with_auth("POST", "/fine_tuning/jobs")
        .respond_with(success_response(job("ftjob-1", "validating_files", None)))
        .mount(&server)
        .await;
    mock_with_auth("GET", "/fine_tuning/jobs/ftjob-1/events")
        .respond_with(success_response(events(&["Validating training file"])))
        .mount(&server)
        .await;
    mock_with_auth("GET", "/fine_tuning/jobs/ftjob-1")
        .respond_with(success_response(json!({
            "id": "ftjob-1",
            "object": "fine_tuning.job",
            "model": "gpt-3.5-turbo-0613",
            "created_at": 1692661014,
            "status": "failed",
            "training_file": "file-train",
            "error": { "code": "invalid_training_file", "message": "Too few examples", "param": null }
        })))
        .mount(&server)
        .await;
    mock_with_auth("POST", "/chat/completions")
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = setup_data(&dir);
    let client = client_for(&server, 0);

    let err = run_trial(client.as_ref(), &config, 0).await.unwrap_err();
    match err {
        PipelineError::JobFailed { job_id, message } => {
            assert_eq!(job_id, "ftjob-1");
            assert_eq!(message, "Too few examples");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
