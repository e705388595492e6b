//! Server module
//!
//! Listener setup, the accept loop, per-connection serving, and graceful
//! shutdown on SIGTERM/SIGINT.

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_reusable_listener;
pub use signal::{start_signal_handler, SignalHandler};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// Accept connections until a shutdown signal arrives.
///
/// On shutdown the listener is dropped immediately so no new connections
/// land; in-flight connections (including active media streams) finish in
/// their own tasks.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                logger::log_shutdown(active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    drop(listener);
    Ok(())
}
