//! Recorded combat events.
//!
//! Every record carries `combat_id`, `timestamp` and an `event_type` tag; the
//! tag selects one of a closed set of payloads. Unknown tags are rejected at
//! decode time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::snowflake::{deserialize_string_id, Snowflake};

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Recording session this event belongs to
    pub combat_id: String,
    /// Producer clock, seconds since the epoch
    pub timestamp: f64,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Payload of an [`Event`], selected by its `event_type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EventKind {
    Message(MessageEvent),
    AliasResolution(AliasResolutionEvent),
    SnippetResolution(SnippetResolutionEvent),
    Command(CommandEvent),
    ButtonPress(ButtonPressEvent),
    AutomationRun(AutomationRunEvent),
    CombatStateUpdate(CombatStateEvent),
}

/// A message was sent in a recorded channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub message_id: Snowflake,
    #[serde(deserialize_with = "deserialize_string_id")]
    pub author_id: String,
    pub author_name: String,
    pub created_at: f64,
    pub content: String,
    pub embeds: Vec<Value>,
    pub components: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_message_id: Option<Snowflake>,
}

/// A message invoked an alias, which was expanded before execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasResolutionEvent {
    pub message_id: Snowflake,
    pub alias_name: String,
    pub alias_body: String,
    pub content_before: String,
    pub content_after: String,
    pub prefix: String,
}

/// A snippet inside a command was expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetResolutionEvent {
    pub message_id: Snowflake,
    pub snippet_name: String,
    pub snippet_body: String,
    pub content_after: String,
}

/// A message was run as a bot command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEvent {
    #[serde(flatten)]
    pub message: MessageEvent,
    pub prefix: String,
    pub command_name: String,
    pub called_by_alias: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caster: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Value>>,
}

/// A button was clicked in a recorded channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonPressEvent {
    pub interaction_id: Snowflake,
    pub interaction_message_id: Snowflake,
    #[serde(deserialize_with = "deserialize_string_id")]
    pub author_id: String,
    pub author_name: String,
    pub button_id: String,
    pub button_label: String,
}

/// An automation document finished executing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationRunEvent {
    pub interaction_id: Snowflake,
    pub automation: Value,
    pub automation_result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caster: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Value>>,
}

/// The recorded combat was committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStateEvent {
    /// May not be the interaction that caused the update, due to caching upstream
    pub probable_interaction_id: Snowflake,
    pub data: Value,
    pub human_readable: String,
}

impl EventKind {
    /// The `event_type` tag as it appears on the wire.
    pub fn event_type(&self) -> &'static str {
        match self {
            EventKind::Message(_) => "message",
            EventKind::AliasResolution(_) => "alias_resolution",
            EventKind::SnippetResolution(_) => "snippet_resolution",
            EventKind::Command(_) => "command",
            EventKind::ButtonPress(_) => "button_press",
            EventKind::AutomationRun(_) => "automation_run",
            EventKind::CombatStateUpdate(_) => "combat_state_update",
        }
    }
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    /// The identifier that ties this event to its causing message or interaction.
    pub fn event_id(&self) -> Snowflake {
        match &self.kind {
            EventKind::Message(e) => e.message_id,
            EventKind::AliasResolution(e) => e.message_id,
            EventKind::SnippetResolution(e) => e.message_id,
            EventKind::Command(e) => e.message.message_id,
            EventKind::ButtonPress(e) => e.interaction_id,
            EventKind::AutomationRun(e) => e.interaction_id,
            EventKind::CombatStateUpdate(e) => e.probable_interaction_id,
        }
    }

    /// The message fields, for `message` and `command` events.
    pub fn as_message(&self) -> Option<&MessageEvent> {
        match &self.kind {
            EventKind::Message(e) => Some(e),
            EventKind::Command(e) => Some(&e.message),
            _ => None,
        }
    }

    pub fn is_message_like(&self) -> bool {
        self.as_message().is_some()
    }
}

/// An event that is not a message was used where one was required.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected a message or command event, got '{event_type}'")]
pub struct NotMessageLike {
    pub event_type: &'static str,
}

/// A message-like event (`message` or `command`).
///
/// Decoding anything else into an `Utterance` fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Event", into = "Event")]
pub struct Utterance(Event);

impl Utterance {
    pub fn event(&self) -> &Event {
        &self.0
    }

    pub fn into_event(self) -> Event {
        self.0
    }

    pub fn message(&self) -> &MessageEvent {
        match &self.0.kind {
            EventKind::Message(e) => e,
            EventKind::Command(e) => &e.message,
            _ => unreachable!("utterances only hold message-like events"),
        }
    }

    pub fn author_name(&self) -> &str {
        &self.message().author_name
    }

    pub fn content(&self) -> &str {
        &self.message().content
    }
}

impl TryFrom<Event> for Utterance {
    type Error = NotMessageLike;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        if event.is_message_like() {
            Ok(Utterance(event))
        } else {
            Err(NotMessageLike {
                event_type: event.event_type(),
            })
        }
    }
}

impl From<Utterance> for Event {
    fn from(utterance: Utterance) -> Self {
        utterance.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! JSON records shaped like the recorder's output.

    pub const MESSAGE: &str = r#"{"combat_id":"c1","event_type":"message","timestamp":1660000000.5,"message_id":1008765432109876543,"author_id":"201234567890123456","author_name":"Grog","created_at":1660000000.25,"content":"I swing my axe!","embeds":[],"components":[],"referenced_message_id":1008765432109876500}"#;

    pub const ALIAS: &str = r#"{"combat_id":"c1","event_type":"alias_resolution","timestamp":1660000001,"message_id":1008765432109876544,"alias_name":"rage","alias_body":"!i effect rage","content_before":"!rage","content_after":"!i effect rage","prefix":"!"}"#;

    pub const SNIPPET: &str = r#"{"combat_id":"c1","event_type":"snippet_resolution","timestamp":1660000001.1,"message_id":1008765432109876544,"snippet_name":"adv","snippet_body":"-adv","content_after":"!a axe -adv"}"#;

    pub const COMMAND: &str = r#"{"combat_id":"c1","event_type":"command","timestamp":1660000002,"message_id":1008765432109876545,"author_id":"201234567890123456","author_name":"Grog","created_at":1660000002,"content":"!a axe","embeds":[{"title":"Grog attacks"}],"components":[],"prefix":"!","command_name":"attack","called_by_alias":false,"caster":{"name":"Grog"},"targets":["Goblin"]}"#;

    pub const BUTTON: &str = r#"{"combat_id":"c1","event_type":"button_press","timestamp":1660000003,"interaction_id":1008765432109876546,"interaction_message_id":1008765432109876547,"author_id":"201234567890123456","author_name":"Grog","button_id":"next","button_label":"Next Turn"}"#;

    pub const AUTOMATION: &str = r#"{"combat_id":"c1","event_type":"automation_run","timestamp":1660000004,"interaction_id":1008765432109876546,"automation":[{"type":"target"}],"automation_result":{"children":[]},"caster":null,"targets":[{"name":"Goblin"}]}"#;

    pub const COMBAT_STATE: &str = r#"{"combat_id":"c1","event_type":"combat_state_update","timestamp":1660000005,"probable_interaction_id":1008765432109876546,"data":{"round_num":2},"human_readable":"Round 2: Goblin"}"#;
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn decode(json: &str) -> Event {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_message_event() {
        let event = decode(MESSAGE);
        assert_eq!(event.combat_id, "c1");
        assert_eq!(event.timestamp, 1660000000.5);
        assert_eq!(event.event_type(), "message");
        match &event.kind {
            EventKind::Message(m) => {
                assert_eq!(m.message_id, 1008765432109876543u64);
                assert_eq!(m.referenced_message_id, Some(Snowflake(1008765432109876500)));
                assert_eq!(m.author_id, "201234567890123456");
                assert_eq!(m.content, "I swing my axe!");
                assert_eq!(m.created_at, 1660000000.25);
            }
            other => panic!("Expected Message, got {:?}", other),
        }
        assert_eq!(event.event_id(), Snowflake(1008765432109876543));
    }

    #[test]
    fn test_every_variant_decodes() {
        let expected = [
            (MESSAGE, "message", 1008765432109876543u64),
            (ALIAS, "alias_resolution", 1008765432109876544),
            (SNIPPET, "snippet_resolution", 1008765432109876544),
            (COMMAND, "command", 1008765432109876545),
            (BUTTON, "button_press", 1008765432109876546),
            (AUTOMATION, "automation_run", 1008765432109876546),
            (COMBAT_STATE, "combat_state_update", 1008765432109876546),
        ];
        for (json, event_type, id) in expected {
            let event = decode(json);
            assert_eq!(event.event_type(), event_type);
            assert_eq!(event.event_id(), id, "{}", event_type);
        }
    }

    #[test]
    fn test_command_extends_message() {
        let event = decode(COMMAND);
        let message = event.as_message().expect("command is message-like");
        assert_eq!(message.content, "!a axe");
        assert_eq!(message.referenced_message_id, None);
        match &event.kind {
            EventKind::Command(c) => {
                assert_eq!(c.command_name, "attack");
                assert!(!c.called_by_alias);
                assert_eq!(c.caster, Some(serde_json::json!({"name": "Grog"})));
                assert_eq!(c.targets, Some(vec![serde_json::json!("Goblin")]));
            }
            other => panic!("Expected Command, got {:?}", other),
        }
    }

    #[test]
    fn test_button_press_keeps_both_ids() {
        match decode(BUTTON).kind {
            EventKind::ButtonPress(b) => {
                assert_eq!(b.interaction_id, 1008765432109876546u64);
                assert_eq!(b.interaction_message_id, 1008765432109876547u64);
                assert_eq!(b.button_label, "Next Turn");
            }
            other => panic!("Expected ButtonPress, got {:?}", other),
        }
    }

    #[test]
    fn test_automation_null_caster() {
        match decode(AUTOMATION).kind {
            EventKind::AutomationRun(a) => {
                assert_eq!(a.caster, None);
                assert_eq!(a.targets.map(|t| t.len()), Some(1));
            }
            other => panic!("Expected AutomationRun, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_event_type_rejected() {
        let json = r#"{"combat_id":"c1","event_type":"dice_roll","timestamp":1}"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        // message without content
        let json = r#"{"combat_id":"c1","event_type":"message","timestamp":1,"message_id":1,"author_id":"a","author_name":"b","created_at":1,"embeds":[],"components":[]}"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn test_serialize_preserves_tag_and_ids() {
        let event = decode(BUTTON);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event_type"], "button_press");
        assert_eq!(value["interaction_id"].as_u64(), Some(1008765432109876546));
        assert_eq!(serde_json::from_value::<Event>(value).unwrap(), event);
    }

    #[test]
    fn test_utterance_accepts_message_and_command() {
        let message: Utterance = serde_json::from_str(MESSAGE).unwrap();
        assert_eq!(message.author_name(), "Grog");
        assert_eq!(message.content(), "I swing my axe!");

        let command: Utterance = serde_json::from_str(COMMAND).unwrap();
        assert_eq!(command.event().event_type(), "command");
        assert_eq!(command.content(), "!a axe");
    }

    #[test]
    fn test_utterance_rejects_other_events() {
        let err = serde_json::from_str::<Utterance>(BUTTON).unwrap_err();
        assert!(err.to_string().contains("button_press"));

        let event = decode(COMBAT_STATE);
        assert_eq!(
            Utterance::try_from(event),
            Err(NotMessageLike {
                event_type: "combat_state_update"
            })
        );
    }

    #[test]
    fn test_utterance_serializes_as_event() {
        let utterance: Utterance = serde_json::from_str(MESSAGE).unwrap();
        let json = serde_json::to_string(&utterance).unwrap();
        let event: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, utterance.into_event());
    }
}
