//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every action becomes one spawned task that reports back through the
//! message channel. Tasks are not tracked or cancelled; overlapping fetches
//! are reconciled by their sequence numbers in the update function.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::trace;

use crate::message::Message;
use crate::UpdateAction;
use stepdeck_core::{ConnectionStatus, DeviceCommand};
use stepdeck_device::DeviceTransport;

/// Execute an action by spawning a background task
pub fn handle_action<T>(action: UpdateAction, transport: Arc<T>, msg_tx: mpsc::Sender<Message>)
where
    T: DeviceTransport + Send + Sync + 'static,
{
    match action {
        UpdateAction::SendCommand { command } => {
            tokio::spawn(async move {
                let _ = msg_tx.send(execute_command(&*transport, command).await).await;
            });
        }

        UpdateAction::SendSequence { commands } => {
            tokio::spawn(async move {
                for command in commands {
                    // Each command reports independently; a failure does not
                    // cancel the rest.
                    let msg = execute_command(&*transport, command).await;
                    if msg_tx.send(msg).await.is_err() {
                        break;
                    }
                }
            });
        }

        UpdateAction::FetchStatus { seq } => {
            tokio::spawn(async move {
                trace!("Fetching status #{}", seq);
                let msg = match transport.fetch_status().await {
                    Ok(state) => Message::StatusReceived { seq, state },
                    Err(e) => Message::StatusFetchFailed {
                        seq,
                        status: ConnectionStatus::from_error(&e),
                        error: e.to_string(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            });
        }
    }
}

/// Send one command and turn the outcome into a result message
pub async fn execute_command<T>(transport: &T, command: DeviceCommand) -> Message
where
    T: DeviceTransport + Sync,
{
    match transport.send_command(&command).await {
        Ok(body) => Message::CommandAcknowledged { command, body },
        Err(e) => Message::CommandFailed {
            command,
            status: ConnectionStatus::from_error(&e),
            error: e.to_string(),
        },
    }
}
