//! Data models for the dataset server's documents and records.

pub mod distill;
pub mod events;
pub mod index;
pub mod snowflake;

pub use distill::{RpToCommandDistill, StateToNarrationDistill, TimeBasedDistill};
pub use events::{
    AliasResolutionEvent, AutomationRunEvent, ButtonPressEvent, CombatStateEvent, CommandEvent,
    Event, EventKind, MessageEvent, NotMessageLike, SnippetResolutionEvent, Utterance,
};
pub use index::{DatasetIndex, HeuristicScoreMap, InstanceHeuristicMap, SortOrder};
pub use snowflake::Snowflake;
