//! Control server

use crate::common::{ControlConfig, Result};
use crate::coordinator::control::ControlPlane;
use crate::coordinator::http::{create_router, CoordState};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct Coordinator {
    config: ControlConfig,
    control: Arc<ControlPlane>,
}

impl Coordinator {
    pub fn new(config: ControlConfig) -> Result<Self> {
        config.validate()?;
        let vaults = config.vault_set()?;

        tracing::info!("Defined {} vaults", vaults.len());
        if vaults.is_empty() {
            tracing::warn!("No vaults configured; every request will fail to reach quorum");
        }
        for vault in vaults.iter() {
            tracing::debug!("  vault: {}", vault);
        }

        let control = Arc::new(ControlPlane::new(vaults, config.vault_timeout())?);
        Ok(Self { config, control })
    }

    pub fn control(&self) -> Arc<ControlPlane> {
        self.control.clone()
    }

    /// Serve on the configured address until Ctrl-C or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        self.serve_with_listener(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    pub async fn serve_with_listener<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Starting control server");
        tracing::info!("  HTTP API: {}", listener.local_addr()?);
        tracing::info!("  Vault timeout: {:?}", self.config.vault_timeout());

        let router = create_router(CoordState {
            control: self.control.clone(),
        });

        tracing::info!("✓ Control server ready");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        tracing::info!("Control server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
