use std::sync::Arc;

use clap::Parser as _;
use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use pod_annotation::webhook as paths;
use pod_annotation_ext as k8s;
use pod_annotation_policy::{CustomDefaulter, CustomValidator, PodAdmissionPolicy};
use serde::Serialize;
use serde::de::DeserializeOwned;

use k8s::corev1;
use k8s::metav1;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use error::WebhookError;
use review::TypedRequest;

mod cli;
mod error;
mod ext;
mod manifests;
mod mutate;
mod review;
mod validate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = cli::Cli::parse();

    if let Some(cli::Command::Manifests(args)) = cli.command {
        print!("{}", manifests::render(&args)?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    tracing::info!("Starting pod-annotation-webhook");

    let policy = Arc::new(PodAdmissionPolicy::new());
    let app = router(policy);

    cli.server.serve(app).await?;

    Ok(())
}

fn router(policy: Arc<PodAdmissionPolicy>) -> Router {
    let webhooks = Router::new()
        .route(
            paths::MUTATE_POD_PATH,
            post(mutate::handler::<corev1::Pod, PodAdmissionPolicy>),
        )
        .route(
            paths::VALIDATE_POD_PATH,
            post(validate::handler::<corev1::Pod, PodAdmissionPolicy>),
        )
        .with_state(policy);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(healthz))
        .merge(webhooks)
}

async fn healthz() -> &'static str {
    "ok"
}
