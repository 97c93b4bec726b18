use chrono::NaiveDate;
use httpmock::prelude::*;
use tidysched::{
    GenerateRequest, HttpRecordStore, JobPatch, RecordStore, SchedulingEngine, StoreSettings,
};

fn settings(server: &MockServer) -> StoreSettings {
    StoreSettings {
        base_url: server.base_url(),
        api_key: Some("test-key".to_string()),
        timeout_seconds: 5,
    }
}

fn client_body() -> serde_json::Value {
    serde_json::json!({
        "id": "cli-1",
        "name": "Alvarez Residence",
        "isRecurring": true,
        "recurringDays": ["Tuesday", "Friday"],
        "recurrenceFrequency": "weekly",
        "recurringStartTime": "9:00 AM",
        "recurringEndTime": "12:00 PM",
        "preferredCleanerIds": ["clean-1"],
        "pricingType": "perCleaning",
        "chargePerCleaning": 150.0,
        "bedrooms": 3,
        "address": "44 Birch St"
    })
}

fn created_job_body() -> serde_json::Value {
    serde_json::json!({
        "id": "job-1",
        "clientId": "cli-1",
        "date": "2025-03-11",
        "startTime": "9:00 AM",
        "endTime": "12:00 PM",
        "durationHours": 3.0,
        "status": "Scheduled",
        "isRecurring": true,
        "recurrenceFrequency": "weekly"
    })
}

#[tokio::test]
async fn generate_round_trip_against_mock_store() {
    let server = MockServer::start();

    let client_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/clients/cli-1")
            .header("Authorization", "Bearer test-key");
        then.status(200).json_body(client_body());
    });
    let jobs_mock = server.mock(|when, then| {
        when.method(GET).path("/jobs").query_param("clientId", "cli-1");
        then.status(200).json_body(serde_json::json!([]));
    });
    let cleaner_mock = server.mock(|when, then| {
        when.method(GET).path("/cleaners/clean-1");
        then.status(200).json_body(serde_json::json!({
            "id": "clean-1",
            "hourlyRate": 25.0
        }));
    });
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/jobs");
        then.status(201).json_body(created_job_body());
    });

    let store = HttpRecordStore::new(&settings(&server)).unwrap();
    // 2025-03-10 is a Monday
    let engine = SchedulingEngine::with_today(store, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    let report = engine
        .generate(&GenerateRequest {
            client_id: "cli-1".to_string(),
            recurring_days: None,
            recurring_start_time: None,
            recurring_end_time: None,
            preferred_cleaner: None,
            frequency: None,
            weeks_to_generate: Some(2),
        })
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.created_count, 4);
    assert_eq!(report.skipped_count, 0);

    client_mock.assert();
    jobs_mock.assert();
    cleaner_mock.assert();
    create_mock.assert_hits(4);
}

#[tokio::test]
async fn missing_client_maps_to_failure_report() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/clients/ghost");
        then.status(404);
    });

    let store = HttpRecordStore::new(&settings(&server)).unwrap();
    let engine = SchedulingEngine::with_today(store, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    let report = engine
        .generate(&GenerateRequest {
            client_id: "ghost".to_string(),
            recurring_days: None,
            recurring_start_time: None,
            recurring_end_time: None,
            preferred_cleaner: None,
            frequency: None,
            weeks_to_generate: None,
        })
        .await
        .unwrap();

    assert!(!report.success);
    assert!(report.message.contains("ghost"));
}

#[tokio::test]
async fn failed_creates_are_counted_not_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/clients/cli-1");
        then.status(200).json_body(client_body());
    });
    server.mock(|when, then| {
        when.method(GET).path("/jobs");
        then.status(200).json_body(serde_json::json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/cleaners/clean-1");
        then.status(200)
            .json_body(serde_json::json!({"id": "clean-1", "hourlyRate": 25.0}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/jobs");
        then.status(500).body("record store exploded");
    });

    let store = HttpRecordStore::new(&settings(&server)).unwrap();
    let engine = SchedulingEngine::with_today(store, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    let report = engine
        .generate(&GenerateRequest {
            client_id: "cli-1".to_string(),
            recurring_days: None,
            recurring_start_time: None,
            recurring_end_time: None,
            preferred_cleaner: None,
            frequency: None,
            weeks_to_generate: Some(1),
        })
        .await
        .unwrap();

    // operation completed, no jobs made it through
    assert!(report.success);
    assert_eq!(report.created_count, 0);
    assert!(report.message.contains("failed"));
}

#[tokio::test]
async fn patch_bodies_carry_only_set_fields() {
    let server = MockServer::start();
    let patch_mock = server.mock(|when, then| {
        when.method("PATCH")
            .path("/jobs/job-1")
            .json_body(serde_json::json!({"date": "2025-03-17"}));
        then.status(200).json_body(created_job_body());
    });

    let store = HttpRecordStore::new(&settings(&server)).unwrap();
    let patch = JobPatch {
        date: NaiveDate::from_ymd_opt(2025, 3, 17),
        ..Default::default()
    };
    store.update_job("job-1", patch).await.unwrap();

    patch_mock.assert();
}

#[tokio::test]
async fn store_errors_surface_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/jobs");
        then.status(503).body("maintenance window");
    });

    let store = HttpRecordStore::new(&settings(&server)).unwrap();
    let err = store.list_jobs(Some("cli-1")).await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("503"));
    assert!(text.contains("maintenance window"));
}
