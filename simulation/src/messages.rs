//! Bounded log of player-facing messages.

use std::collections::VecDeque;

/// Number of entries the log retains.
pub const MESSAGE_LOG_CAPACITY: usize = 8;

/// Category of a logged message, used by renderers to pick a colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Narrative text announcing a wave.
    Briefing,
    /// Tactical advice from the oracle.
    Advice,
    /// Progress notices such as cleared waves.
    Notice,
    /// Rejected actions and game over.
    Warning,
}

/// Single entry of the message log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Category of the message.
    pub kind: MessageKind,
    /// Text shown to the player.
    pub text: String,
}

/// Keeps the latest [`MESSAGE_LOG_CAPACITY`] messages, oldest first.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    entries: VecDeque<Message>,
}

impl MessageLog {
    pub(crate) fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        if self.entries.len() == MESSAGE_LOG_CAPACITY {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(Message {
            kind,
            text: text.into(),
        });
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterator over the retained messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    /// Number of retained messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_are_evicted() {
        let mut log = MessageLog::default();
        for index in 0..12 {
            log.push(MessageKind::Notice, format!("message {index}"));
        }

        assert_eq!(log.len(), MESSAGE_LOG_CAPACITY);
        assert_eq!(
            log.iter().next().map(|message| message.text.as_str()),
            Some("message 4")
        );
    }
}
