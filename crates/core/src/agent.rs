//! Inbound edits from an automation agent.
//!
//! Agents never touch the editor directly: they post [`AgentEvent`]s on a
//! channel, and the editor drains the channel on its own thread.

use crate::error::Result;
use crate::operations::Operation;
use crate::types::Slide;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// One batch of agent-authored edits.
///
/// When `slides_data` is present it replaces the whole deck and
/// `operations` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<Operation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides_data: Option<Vec<Slide>>,
}

impl AgentEvent {
    pub fn operations(operations: Vec<Operation>) -> Self {
        Self {
            operations: Some(operations),
            slides_data: None,
        }
    }

    pub fn replacement(slides: Vec<Slide>) -> Self {
        Self {
            operations: None,
            slides_data: Some(slides),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True if the event carries nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.slides_data.is_none() && self.operations.as_ref().map_or(true, Vec::is_empty)
    }
}

/// Sending half handed to agents. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AgentSender {
    tx: Sender<AgentEvent>,
}

impl AgentSender {
    /// Queue an event. Returns false if the editor has gone away.
    pub fn send(&self, event: AgentEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Receiving half owned by the editor.
#[derive(Debug)]
pub struct AgentReceiver {
    rx: Receiver<AgentEvent>,
}

impl AgentReceiver {
    /// Next queued event, without blocking.
    pub fn try_next(&self) -> Option<AgentEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Create a connected sender/receiver pair.
pub fn agent_channel() -> (AgentSender, AgentReceiver) {
    let (tx, rx) = mpsc::channel();
    (AgentSender { tx }, AgentReceiver { rx })
}
