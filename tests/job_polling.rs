mod support;

use std::time::Duration;

use serde_json::json;
use swapmylook_client::domain::JobState;
use swapmylook_client::interface_adapters::{GenerationJobs, QuiltDesignJobs};
use swapmylook_client::use_cases::{PollError, PollJobUseCase, PollPolicy};
use support::{FakeBackend, Harness, job_status_json};

fn quick_policy() -> PollPolicy {
    PollPolicy {
        initial_interval: Duration::from_millis(10),
        backoff_factor: 1.5,
        max_interval: Duration::from_millis(40),
        max_attempts: 10,
        max_consecutive_transport_errors: 3,
    }
}

#[tokio::test]
async fn when_generation_job_finishes_then_poll_returns_the_output() {
    let backend = FakeBackend::start().await;
    let mut done = job_status_json("j1", "succeeded");
    done["outputImage"] = json!({
        "id": "out1",
        "url": "https://cdn.example.com/out1.png",
        "width": 512,
        "height": 768,
        "sizeBytes": 1024
    });
    backend
        .respond("GET", "/generate/j1/status", 200, job_status_json("j1", "queued"))
        .respond("GET", "/generate/j1/status", 200, job_status_json("j1", "processing"))
        .respond("GET", "/generate/j1/status", 200, done);
    let harness = Harness::signed_in(&backend.base_url, "t0");
    let poll = PollJobUseCase {
        tracker: GenerationJobs(harness.client.clone()),
        policy: quick_policy(),
    };

    let report = poll.execute("j1").await.expect("job should finish");

    assert_eq!(report.status, JobState::Succeeded);
    assert_eq!(
        report.output_image.map(|image| image.id),
        Some("out1".to_string())
    );
    assert_eq!(backend.requests_to("/generate/j1/status").len(), 3);
}

#[tokio::test]
async fn when_job_never_finishes_then_poll_times_out() {
    let backend = FakeBackend::start().await;
    backend.respond("GET", "/generate/j2/status", 200, job_status_json("j2", "processing"));
    let harness = Harness::signed_in(&backend.base_url, "t0");
    let poll = PollJobUseCase {
        tracker: GenerationJobs(harness.client.clone()),
        policy: PollPolicy {
            max_attempts: 3,
            ..quick_policy()
        },
    };

    let result = poll.execute("j2").await;

    assert!(matches!(result, Err(PollError::TimedOut { attempts: 3, .. })));
    assert_eq!(backend.requests_to("/generate/j2/status").len(), 3);
}

#[tokio::test]
async fn when_token_expires_mid_poll_then_poll_stops_and_session_is_cleared() {
    let backend = FakeBackend::start().await;
    backend
        .respond("GET", "/generate/j3/status", 200, job_status_json("j3", "processing"))
        .respond("GET", "/generate/j3/status", 401, json!({ "error": "Token expired" }));
    let harness = Harness::signed_in(&backend.base_url, "t0");
    let poll = PollJobUseCase {
        tracker: GenerationJobs(harness.client.clone()),
        policy: quick_policy(),
    };

    let result = poll.execute("j3").await;

    match result {
        Err(PollError::Status(error)) => assert!(error.is_auth_failure()),
        other => panic!("expected auth failure, got {other:?}"),
    }
    assert!(!harness.client.is_authenticated());
    assert_eq!(backend.requests_to("/generate/j3/status").len(), 2);
}

#[tokio::test]
async fn when_quilt_design_fails_then_poll_returns_the_failed_report() {
    let backend = FakeBackend::start().await;
    backend.respond(
        "GET",
        "/tools/quilt-design/q1/status",
        200,
        json!({
            "jobId": "q1",
            "status": "failed",
            "userId": "u1",
            "createdAt": "2025-03-01T12:00:00.000Z",
            "updatedAt": "2025-03-01T12:01:00.000Z",
            "error": "Generation failed"
        }),
    );
    let harness = Harness::signed_in(&backend.base_url, "t0");
    let poll = PollJobUseCase {
        tracker: QuiltDesignJobs(harness.client.clone()),
        policy: quick_policy(),
    };

    let report = poll.execute("q1").await.expect("failed job is still a result");

    assert_eq!(report.status, JobState::Failed);
    assert_eq!(report.error.as_deref(), Some("Generation failed"));
}

#[tokio::test]
async fn when_quilt_prompt_is_blank_then_no_job_is_created() {
    let backend = FakeBackend::start().await;
    let harness = Harness::signed_in(&backend.base_url, "t0");

    let result = harness.client.generate_quilt_design("   ", None).await;

    assert!(result.is_err());
    assert!(backend.requests().is_empty());
}
