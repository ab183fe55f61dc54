use std::net::SocketAddr;
use std::path::PathBuf;

use axum_server::tls_rustls::RustlsConfig;
use clap::{Args, Parser, Subcommand};

use super::*;

const TLS_CERT_FILE: &str = "tls.crt";
const TLS_KEY_FILE: &str = "tls.key";

/// Admission webhook for the sample Pod annotation.
#[derive(Debug, Parser)]
#[command(name = "pod-annotation-webhook", version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,

    #[command(flatten)]
    pub(crate) server: ServerArgs,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the webhook configurations registering this server
    Manifests(ManifestArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ServerArgs {
    /// Address the webhook server listens on
    #[arg(long, env = "WEBHOOK_BIND_ADDRESS", default_value = "0.0.0.0:9443")]
    pub(crate) bind: SocketAddr,

    /// Directory holding tls.crt and tls.key, plain HTTP is served without it
    #[arg(long, env = "WEBHOOK_CERT_DIR")]
    pub(crate) cert_dir: Option<PathBuf>,
}

impl ServerArgs {
    pub(crate) async fn serve(&self, app: Router) -> std::io::Result<()> {
        match &self.cert_dir {
            Some(dir) => {
                let config =
                    RustlsConfig::from_pem_file(dir.join(TLS_CERT_FILE), dir.join(TLS_KEY_FILE))
                        .await?;
                tracing::info!(addr = %self.bind, cert_dir = %dir.display(), "Listening on https");
                axum_server::bind_rustls(self.bind, config)
                    .serve(app.into_make_service())
                    .await
            }
            None => {
                let listener = tokio::net::TcpListener::bind(self.bind).await?;
                if let Ok(addr) = listener.local_addr() {
                    tracing::info!("Listening on http://{addr}");
                }
                axum::serve(listener, app).await
            }
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ManifestArgs {
    /// Name of the Service fronting the webhook server
    #[arg(long, default_value = "pod-annotation-webhook")]
    pub(crate) service_name: String,

    /// Namespace of the Service fronting the webhook server
    #[arg(long, default_value = "default")]
    pub(crate) namespace: String,

    /// Service port the API server connects to
    #[arg(long, default_value_t = 443)]
    pub(crate) port: i32,

    /// cert-manager Certificate (<namespace>/<name>) whose CA is injected
    #[arg(long)]
    pub(crate) inject_ca_from: Option<String>,
}
