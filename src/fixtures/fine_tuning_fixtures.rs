//! Fine-tuning job and event fixtures

use serde_json::{json, Value};

pub const COMPLETION_MESSAGE: &str = "The job has successfully completed";

pub fn fine_tuning_job_response() -> Value {
    fine_tuning_job_with_status("ftjob-abc123", "validating_files", None)
}

pub fn fine_tuning_job_with_status(id: &str, status: &str, fine_tuned_model: Option<&str>) -> Value {
    json!({
        "id": id,
        "object": "fine_tuning.job",
        "model": "gpt-3.5-turbo-0613",
        "created_at": 1692661014,
        "finished_at": null,
        "fine_tuned_model": fine_tuned_model,
        "organization_id": "org-123",
        "result_files": [],
        "status": status,
        "validation_file": "file-def456",
        "training_file": "file-abc123",
        "hyperparameters": { "n_epochs": "auto" },
        "trained_tokens": null,
        "error": null
    })
}

/// A job whose `error` is the empty object the API sends when nothing failed
pub fn job_with_empty_error(id: &str, status: &str, fine_tuned_model: Option<&str>) -> Value {
    let mut job = fine_tuning_job_with_status(id, status, fine_tuned_model);
    job["error"] = json!({});
    job
}

pub fn failed_job_response(id: &str) -> Value {
    json!({
        "id": id,
        "object": "fine_tuning.job",
        "model": "gpt-3.5-turbo-0613",
        "created_at": 1692661014,
        "finished_at": 1692661200,
        "fine_tuned_model": null,
        "status": "failed",
        "training_file": "file-abc123",
        "validation_file": "file-def456",
        "result_files": [],
        "error": {
            "code": "invalid_training_file",
            "message": "The training file has fewer than 10 examples.",
            "param": "training_file"
        }
    })
}

/// Events newest first, the way the events endpoint returns them
pub fn events_response(messages: &[&str]) -> Value {
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

    json!({
        "object": "list",
        "data": data,
        "has_more": false
    })
}

pub fn running_events() -> Value {
    events_response(&["Step 10/100: training loss=0.52", "Fine-tuning job started"])
}

pub fn completed_events() -> Value {
    events_response(&[
        COMPLETION_MESSAGE,
        "New fine-tuned model created: ft:gpt-3.5-turbo-0613:org::_ft_0",
        "Step 100/100: training loss=0.02",
    ])
}
