//! Message processing
//!
//! Runs a message and its follow-ups through the TEA update function and
//! dispatches the resulting actions.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::message::Message;
use crate::state::AppState;
use crate::{handler, UpdateAction};
use stepdeck_device::DeviceTransport;

/// Process a message through the TEA update function.
///
/// Returns the actions that were dispatched, in order.
pub fn process_message<T>(
    state: &mut AppState,
    message: Message,
    transport: &Arc<T>,
    msg_tx: &mpsc::Sender<Message>,
) -> Vec<UpdateAction>
where
    T: DeviceTransport + Send + Sync + 'static,
{
    let mut dispatched = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            dispatched.push(action.clone());
            handle_action(action, transport.clone(), msg_tx.clone());
        }

        msg = result.message;
    }
    dispatched
}
