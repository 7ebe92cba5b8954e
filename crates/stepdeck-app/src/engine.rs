//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the application state, the message channel, the shutdown
//! signal and the device transport. Both runners drive it the same way:
//! feed it messages, then drain what background tasks sent back.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::state::AppState;
use crate::{poller, process, signals, UpdateAction};
use stepdeck_core::{ConnectionStatus, DeviceCommand};
use stepdeck_device::DeviceTransport;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    connection: ConnectionStatus,
    status_revision: u64,
    alert: Option<String>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            connection: state.connection,
            status_revision: state.status_revision,
            alert: state.alert.clone(),
        }
    }
}

/// Orchestration engine for stepdeck.
pub struct Engine<T> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, poller, tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    transport: Arc<T>,

    poller: Option<JoinHandle<()>>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl<T> Engine<T>
where
    T: DeviceTransport + Send + Sync + 'static,
{
    /// Create an engine around a device transport.
    ///
    /// Nothing runs in the background until [`Engine::start`].
    pub fn new(settings: Settings, transport: T) -> Self {
        let state = AppState::with_settings(settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            transport: Arc::new(transport),
            poller: None,
            event_tx,
        }
    }

    /// Spawn the signal handler and the status poller
    pub fn start(&mut self) {
        signals::spawn_signal_handler(self.msg_tx.clone());
        self.start_polling(self.state.settings.poll_interval());
    }

    /// Spawn the status poller at `interval`, replacing any running one
    pub fn start_polling(&mut self, interval: Duration) {
        if let Some(previous) = self.poller.take() {
            previous.abort();
        }
        self.poller = Some(poller::spawn_status_poller(
            interval,
            self.msg_tx.clone(),
            self.shutdown_rx.clone(),
        ));
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for what changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);
        self.emit_result_events(&msg);

        let dispatched =
            process::process_message(&mut self.state, msg, &self.transport, &self.msg_tx);

        for action in &dispatched {
            self.emit_action_events(action);
        }

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it.
    ///
    /// Returns `false` if the channel closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Stop background tasks
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.poller.take() {
            match tokio::time::timeout(Duration::from_secs(2), handle).await {
                Ok(Ok(())) => debug!("Poller stopped"),
                Ok(Err(e)) => warn!("Poller task failed: {}", e),
                Err(_) => warn!("Poller shutdown timed out"),
            }
        }
    }

    /// Events that follow directly from a result message
    fn emit_result_events(&self, msg: &Message) {
        match msg {
            Message::CommandAcknowledged { command, body } => {
                self.emit(EngineEvent::CommandAcknowledged {
                    command: *command,
                    body: body.clone(),
                });
            }
            Message::CommandFailed { command, error, .. } => {
                self.emit(EngineEvent::CommandFailed {
                    command: *command,
                    error: error.clone(),
                });
            }
            _ => {}
        }
    }

    fn emit_action_events(&self, action: &UpdateAction) {
        let sent = |command: &DeviceCommand| {
            self.emit(EngineEvent::CommandSent { command: *command });
        };
        match action {
            UpdateAction::SendCommand { command } => sent(command),
            UpdateAction::SendSequence { commands } => commands.iter().for_each(sent),
            UpdateAction::FetchStatus { .. } => {}
        }
    }

    /// Compare pre/post snapshots and emit what changed
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if post.status_revision != pre.status_revision {
            self.emit(EngineEvent::StatusUpdated {
                state: self.state.motor,
            });
        }

        if pre.connection != post.connection {
            self.emit(EngineEvent::ConnectionChanged {
                old: pre.connection,
                new: post.connection,
            });
        }

        if post.alert.is_some() && post.alert != pre.alert {
            if let Some(message) = &post.alert {
                self.emit(EngineEvent::InputRejected {
                    message: message.clone(),
                });
            }
        }
    }

    /// send() returns Err only if there are no receivers
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
