//! Shared helpers for tutor-service integration tests.

use std::sync::Arc;
use std::time::Duration;

use tutor_service::config::TutorConfig;
use tutor_service::services::providers::mock::MockTextProvider;
use tutor_service::services::{CompletionClient, SessionController};
use tutor_service::startup::Application;

pub struct TestApp {
    pub address: String,
    pub controller: Arc<SessionController>,
}

/// Spawn the application on a random port around `client`.
pub async fn spawn_app_with(client: CompletionClient) -> TestApp {
    let app = Application::build_with_client(TutorConfig::unconfigured(), client)
        .await
        .expect("Failed to build application");

    let address = format!("http://127.0.0.1:{}", app.http_port());
    let controller = app.controller();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestApp {
        address,
        controller,
    }
}

/// Spawn the application backed by `mock`.
pub async fn spawn_app(mock: Arc<MockTextProvider>) -> TestApp {
    spawn_app_with(CompletionClient::with_provider(mock)).await
}
