//! Periodic status polling
//!
//! The device has no push channel, so a timer task emits
//! [`Message::PollTick`] at a fixed period until shutdown. The first tick
//! fires immediately so the panel fills in at startup.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::message::Message;

/// Spawn the poll timer
pub fn spawn_status_poller(
    interval: Duration,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Polling device status every {:?}", interval);
        let mut tick = tokio::time::interval(interval);
        // A slow loop skips ticks rather than bursting to catch up
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if msg_tx.send(Message::PollTick).await.is_err() {
                        debug!("Message channel closed, stopping poller");
                        break;
                    }
                }

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Status poller stopped");
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_poller_ticks_on_interval() {
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let _handle = spawn_status_poller(Duration::from_millis(500), tx, shutdown_rx);

        // Immediate first tick
        assert!(matches!(rx.recv().await, Some(Message::PollTick)));

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(matches!(rx.recv().await, Some(Message::PollTick)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_stops_on_shutdown() {
        let (tx, mut rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_status_poller(Duration::from_secs(2), tx, shutdown_rx);
        assert!(matches!(rx.recv().await, Some(Message::PollTick)));

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        // Sender dropped with the task
        assert!(rx.recv().await.is_none());
    }
}
