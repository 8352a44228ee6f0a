//! Comms subsystem: the external I/O channels.
//!
//! Each channel (console, HTTP) implements [`Channel`] and is spawned as an
//! independent task by [`start`]. Channels share the [`AppContext`] and the
//! shutdown token; if one exits with an error the token is cancelled so the
//! others stop too.

#[cfg(feature = "channel-axum")]
pub mod axum_channel;
#[cfg(feature = "channel-pty")]
pub mod pty;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::context::AppContext;
use crate::error::AppError;

// ── Channel ───────────────────────────────────────────────────────────────────

/// Boxed run-loop returned by [`Channel::run`].
pub type ChannelFuture = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'static>>;

pub trait Channel: Send + 'static {
    /// Stable identifier used in log messages.
    fn id(&self) -> &str;

    /// Consume the channel and return its run-loop. The loop must return
    /// once `shutdown` is cancelled.
    fn run(self: Box<Self>, ctx: Arc<AppContext>, shutdown: CancellationToken) -> ChannelFuture;
}

// ── CommsHandle ───────────────────────────────────────────────────────────────

/// Resolves when every channel has exited.
pub struct CommsHandle {
    inner: JoinHandle<Result<(), AppError>>,
}

impl CommsHandle {
    /// Await all channels and return the first error, if any.
    pub async fn join(self) -> Result<(), AppError> {
        match self.inner.await {
            Ok(r) => r,
            Err(e) => Err(AppError::Comms(format!("comms task panicked: {e}"))),
        }
    }
}

// ── start ─────────────────────────────────────────────────────────────────────

/// Spawn every channel enabled in config. Synchronous: returns as soon as
/// the tasks are spawned.
pub fn start(ctx: Arc<AppContext>, shutdown: CancellationToken) -> CommsHandle {
    let mut channels: Vec<Box<dyn Channel>> = Vec::new();

    #[cfg(feature = "channel-pty")]
    {
        if ctx.config.comms.pty.enabled {
            info!("loading pty channel");
            channels.push(Box::new(pty::PtyChannel::new("pty0")));
        }
    }

    #[cfg(feature = "channel-axum")]
    {
        if ctx.config.comms.http.enabled {
            info!(bind = %ctx.config.comms.http.bind, "loading axum channel");
            channels.push(Box::new(axum_channel::AxumChannel::new(
                "http0",
                ctx.config.comms.http.bind.clone(),
            )));
        }
    }

    if channels.is_empty() {
        info!("no comms channels configured; waiting for shutdown");
    }

    spawn_channels(channels, ctx, shutdown)
}

/// Run each channel on its own task. A failing or panicking channel cancels
/// `shutdown`; the first error is returned once all have drained.
pub fn spawn_channels(
    channels: Vec<Box<dyn Channel>>,
    ctx: Arc<AppContext>,
    shutdown: CancellationToken,
) -> CommsHandle {
    let inner = tokio::spawn(async move {
        let mut set: JoinSet<Result<(), AppError>> = JoinSet::new();
        let idle = channels.is_empty();

        for channel in channels {
            debug!(channel = %channel.id(), "spawning channel");
            set.spawn(channel.run(ctx.clone(), shutdown.clone()));
        }

        if idle {
            shutdown.cancelled().await;
            return Ok(());
        }

        let mut first_err: Option<AppError> = None;
        while let Some(res) = set.join_next().await {
            match res {
                Err(e) => {
                    error!("channel panicked: {e}");
                    shutdown.cancel();
                    first_err.get_or_insert_with(|| AppError::Comms(format!("channel panicked: {e}")));
                }
                Ok(Err(e)) => {
                    error!("channel exited with error: {e}");
                    shutdown.cancel();
                    first_err.get_or_insert(e);
                }
                Ok(Ok(())) => {}
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    });

    CommsHandle { inner }
}
