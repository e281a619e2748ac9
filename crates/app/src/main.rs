//! Restaurant ordering shell entry point.

use std::io::Write;

use app::Config;
use app::shell::render_status;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, shutting down");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        }
    }
}

fn print(lines: &[String]) {
    let mut out = std::io::stdout().lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    // 1. Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    // 2. Initialize tracing
    if let Err(e) = app::init_tracing(&config) {
        eprintln!("failed to initialize logging: {e}");
    }

    // 3. Create the order session
    let mut shell = match app::build_shell(&config) {
        Ok(shell) => shell,
        Err(e) => {
            tracing::error!(error = %e, "failed to start order session");
            return std::process::ExitCode::FAILURE;
        }
    };
    tracing::info!(
        delivery_fee = %config.pricing.delivery_fee,
        tax_rate_bps = config.pricing.tax_rate_bps,
        delivered_after = ?config.schedule.total(),
        "ordering shell started"
    );

    println!("Welcome to Restaurant! Type `help` for commands.");

    // 4. Read commands until quit, EOF or a signal
    let mut status = shell.session().subscribe_status();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let progress = status.borrow_and_update().clone();
                if progress.order.is_some() {
                    print(&render_status(&progress));
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to read input");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                let reply = shell.execute(&line);
                print(&reply.render());
                if reply.quit {
                    break;
                }
            }
        }
    }

    tracing::info!("ordering shell stopped");
    std::process::ExitCode::SUCCESS
}
