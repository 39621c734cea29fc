//! Distillation envelopes.
//!
//! A distillation groups raw events into one task-specific record; each
//! distill endpoint streams one envelope per NDJSON line.

use serde::{Deserialize, Serialize};

use super::events::{Event, Utterance};

/// Role-play text followed by the bot commands it led to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpToCommandDistill {
    pub utterances: Vec<Utterance>,
    pub commands: Vec<Event>,
}

/// Combat state followed by the narration written about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateToNarrationDistill {
    pub state: Vec<Event>,
    pub utterances: Vec<Utterance>,
}

/// Commands grouped with the messages in a time window around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBasedDistill {
    pub before: Vec<Utterance>,
    pub commands: Vec<Event>,
    pub after: Vec<Utterance>,
}

impl TimeBasedDistill {
    /// All events in the window, in order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.before
            .iter()
            .map(Utterance::event)
            .chain(self.commands.iter())
            .chain(self.after.iter().map(Utterance::event))
    }
}
