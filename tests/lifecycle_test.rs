//! End-to-end lifecycle tests against both listeners.

use random_service::health::ServerStatus;
use random_service::http::{AboutResponse, ErrorResponse, NumberResponse};
use random_service::lifecycle::SupervisorError;
use random_service::{ServiceConfig, Supervisor};
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_public_endpoint_end_to_end() {
    let running = common::start_service(common::test_config()).await;
    let client = common::client();
    let base = format!("http://{}", running.public_addr());

    let res = client.get(format!("{}/random", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body: NumberResponse = res.json().await.unwrap();
    assert_eq!(body.values.len(), 1);
    assert!((0..100).contains(&body.values[0]));

    let res = client
        .get(format!("{}/random?min=100&max=50", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = res.json().await.unwrap();
    assert_eq!(body.error, "min cannot be greater than max");

    let res = client
        .get(format!("{}/random?num=0", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"error":"num must be between 1 and 100"}"#
    );

    running.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_admin_endpoints() {
    let running = common::start_service(common::test_config()).await;
    let client = common::client();
    let admin = format!("http://{}", running.admin_addr());

    let res = client.get(format!("{}/live", admin)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(format!("{}/ready", admin)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let first: AboutResponse = client
        .get(format!("{}/about", admin))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: AboutResponse = client
        .get(format!("{}/about", admin))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first.name, "random");
    assert_eq!(first, second);
    let hostname = nix::unistd::gethostname().unwrap();
    assert_eq!(first.hostname, hostname.to_string_lossy());

    let res = client.get(format!("{}/metrics", admin)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    running.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_readiness_fails_once_shutdown_begins() {
    let running = common::start_service(common::test_config()).await;
    let client = common::client();
    let ready_url = format!("http://{}/ready", running.admin_addr());

    assert_eq!(
        client.get(&ready_url).send().await.unwrap().status(),
        StatusCode::OK
    );

    // First step of shutdown, before the drain is triggered.
    running.health().mark_shutting_down();
    let res = client.get(&ready_url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"http":"HTTP server is shutting down"}"#
    );

    let health = running.health().clone();
    running.shutdown().await.unwrap();
    assert_eq!(health.status(), ServerStatus::ShuttingDown);
}

#[tokio::test]
async fn test_public_listener_refuses_after_drain() {
    let running = common::start_service(common::test_config()).await;
    let public_addr = running.public_addr();

    running.shutdown().await.unwrap();

    let res = common::client()
        .get(format!("http://{}/random", public_addr))
        .send()
        .await;
    assert!(res.is_err(), "public listener should be closed after drain");
}

#[tokio::test]
async fn test_seeded_service_is_reproducible() {
    let config = ServiceConfig {
        random_seed: Some(1),
        ..common::test_config()
    };

    let mut sequences = Vec::new();
    for _ in 0..2 {
        let running = common::start_service(config.clone()).await;
        let body: NumberResponse = common::client()
            .get(format!("http://{}/random?num=10", running.public_addr()))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        sequences.push(body.values);
        running.shutdown().await.unwrap();
    }

    assert_eq!(sequences[0], sequences[1]);
}

#[tokio::test]
async fn test_admin_port_in_use_is_fatal() {
    let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = ServiceConfig {
        admin_port: occupied.local_addr().unwrap().port(),
        ..common::test_config()
    };

    let err = Supervisor::new(config).start().await.err().unwrap();
    assert!(matches!(err, SupervisorError::Bind(_)));
    assert!(err.to_string().contains("admin listener"));
}
