use log::{error, info};
use project_store_core::init_logging;
use project_store_server::{build_router, prepare_state, ServerConfig, StartupError};
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=server status=error error={}", err);
            eprintln!("project-store-server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env();
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(StartupError::Logging)?;
    let addr = config.bind_addr().map_err(StartupError::Config)?;

    let state = tokio::task::block_in_place(|| prepare_state(&config))?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        "event=server_start module=server status=ok addr={} data_file={} version={}",
        addr,
        config.data_file.display(),
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=signal module=server status=error signal=ctrl_c error={}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("event=signal module=server status=error signal=sigterm error={}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("event=shutdown module=server status=start");
}
