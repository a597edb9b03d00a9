//! Game events and the message log
//!
//! The core never formats text. It records [`LogEntry`] templates with the
//! actors they refer to, plus a typed [`GameEvent`] stream a presentation
//! layer can render or serialize.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, ConditionKind};
use crate::dungeon::Pos;
use crate::monster::MonsterState;

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Moved {
        actor: ActorId,
        from: Pos,
        to: Pos,
    },
    Missed {
        attacker: ActorId,
        defender: ActorId,
    },
    Damaged {
        actor: ActorId,
        amount: i32,
        source: String,
        attacker: Option<ActorId>,
    },
    Healed {
        actor: ActorId,
        amount: i32,
    },
    Died {
        actor: ActorId,
        killer: Option<ActorId>,
    },
    ConditionApplied {
        actor: ActorId,
        condition: ConditionKind,
        duration: i32,
    },
    ConditionExpired {
        actor: ActorId,
        condition: ConditionKind,
    },
    FearStateChanged {
        actor: ActorId,
        from: MonsterState,
        to: MonsterState,
    },
    MoveUsed {
        actor: ActorId,
        index: usize,
    },
    Woke {
        actor: ActorId,
    },
}

/// A message template and the actors it mentions, in order.
///
/// `{1}` refers to the first participant, `{2}` to the second. Verb forms in
/// brackets (`hit[s]`, `[are|is]`) are resolved by whoever renders the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub template: Cow<'static, str>,
    pub participants: Vec<ActorId>,
}

impl LogEntry {
    pub fn new(template: impl Into<Cow<'static, str>>, participants: Vec<ActorId>) -> Self {
        Self {
            template: template.into(),
            participants,
        }
    }
}

/// Accumulates log entries and events until the driver drains them.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&mut self, template: impl Into<Cow<'static, str>>, participants: &[ActorId]) {
        self.entries.push(LogEntry::new(template, participants.to_vec()));
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take everything recorded so far.
    pub fn drain(&mut self) -> (Vec<LogEntry>, Vec<GameEvent>) {
        (
            std::mem::take(&mut self.entries),
            std::mem::take(&mut self.events),
        )
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.events.clear();
    }
}
