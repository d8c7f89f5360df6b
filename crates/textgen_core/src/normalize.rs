//! Conversation normalization into a backend's turn vocabulary.
//!
//! Every adapter declares a [`RoleTable`]; [`normalize`] applies it. The result is a
//! pure function of the message list and the table, which is what makes cache keys
//! built from it stable.

use crate::{Message, Role};
use serde::{Deserialize, Serialize};

/// Opening user turn for a `leading_user` table when there is no system prompt to use.
pub const OPENING_USER_TURN: &str = "...";

/// Where a backend wants the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPlacement {
    /// One native system turn at the head of the list, using the given role token
    LeadingTurn(&'static str),
    /// A dedicated request field outside the turn list
    Separate,
    /// Prepended to the first turn when it is a user turn, else a new leading user turn
    FoldIntoFirstUser,
}

/// Backend role vocabulary and turn-taking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleTable {
    /// Token for user turns
    pub user: &'static str,
    /// Token for model turns
    pub assistant: &'static str,
    /// System prompt placement
    pub system: SystemPlacement,
    /// Merge adjacent turns that share a role
    pub merge_consecutive: bool,
    /// The turn list must open with a user turn
    pub leading_user: bool,
}

impl RoleTable {
    /// Backend token for a non-system role.
    pub fn token(&self, role: Role) -> Option<&'static str> {
        match role {
            Role::User => Some(self.user),
            Role::Assistant => Some(self.assistant),
            Role::System => None,
        }
    }
}

/// One turn in backend vocabulary.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct Turn {
    /// Backend role token
    role: String,
    /// Turn text
    content: String,
}

impl Turn {
    /// Creates a turn.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A conversation after role mapping and system folding.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
)]
pub struct Conversation {
    /// System prompt for backends with a separate field
    system: Option<String>,
    /// Turns in original order
    turns: Vec<Turn>,
}

impl Conversation {
    /// The last turn, which several backends send apart from the history.
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

/// Maps `messages` onto a backend's vocabulary.
///
/// All system messages are joined with `\n` in their original order and placed
/// according to `table.system`. Non-system turns keep their relative order.
///
/// When `table.leading_user` is set and the turns would not open with a user turn,
/// a user turn is inserted at the head. It carries the separate system prompt,
/// which then leaves the system field, or [`OPENING_USER_TURN`] when there is none.
///
/// # Examples
///
/// ```
/// use textgen_core::{normalize, Message, RoleTable, SystemPlacement};
///
/// let table = RoleTable {
///     user: "user",
///     assistant: "model",
///     system: SystemPlacement::FoldIntoFirstUser,
///     merge_consecutive: false,
///     leading_user: false,
/// };
/// let conversation = normalize(&[Message::system("A"), Message::user("B")], &table);
///
/// assert_eq!(conversation.turns()[0].content(), "A\nB");
/// assert!(conversation.system().is_none());
/// ```
pub fn normalize(messages: &[Message], table: &RoleTable) -> Conversation {
    let system_parts: Vec<&str> = messages
        .iter()
        .filter(|m| *m.role() == Role::System)
        .map(|m| m.content().as_str())
        .collect();
    let system = (!system_parts.is_empty()).then(|| system_parts.join("\n"));

    let mut turns: Vec<Turn> = messages
        .iter()
        .filter_map(|m| table.token(*m.role()).map(|role| Turn::new(role, m.content())))
        .collect();

    let mut separate = None;
    if let Some(system) = system {
        match table.system {
            SystemPlacement::LeadingTurn(token) => turns.insert(0, Turn::new(token, system)),
            SystemPlacement::Separate => separate = Some(system),
            SystemPlacement::FoldIntoFirstUser => match turns.first_mut() {
                Some(first) if first.role == table.user => {
                    first.content = format!("{}\n{}", system, first.content);
                }
                _ => turns.insert(0, Turn::new(table.user, system)),
            },
        }
    }

    if table.merge_consecutive {
        turns = merge_consecutive(turns);
    }

    if table.leading_user && turns.first().is_none_or(|first| first.role != table.user) {
        let opening = separate
            .take()
            .unwrap_or_else(|| OPENING_USER_TURN.to_string());
        turns.insert(0, Turn::new(table.user, opening));
    }

    Conversation {
        system: separate,
        turns,
    }
}

fn merge_consecutive(turns: Vec<Turn>) -> Vec<Turn> {
    let mut merged: Vec<Turn> = Vec::with_capacity(turns.len());
    for turn in turns {
        match merged.last_mut() {
            Some(prev) if prev.role == turn.role => {
                prev.content.push('\n');
                prev.content.push_str(&turn.content);
            }
            _ => merged.push(turn),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOLDING: RoleTable = RoleTable {
        user: "user",
        assistant: "model",
        system: SystemPlacement::FoldIntoFirstUser,
        merge_consecutive: false,
        leading_user: false,
    };

    const SEPARATE: RoleTable = RoleTable {
        user: "user",
        assistant: "assistant",
        system: SystemPlacement::Separate,
        merge_consecutive: true,
        leading_user: false,
    };

    const USER_FIRST: RoleTable = RoleTable {
        leading_user: true,
        ..SEPARATE
    };

    const LEADING: RoleTable = RoleTable {
        user: "user",
        assistant: "assistant",
        system: SystemPlacement::LeadingTurn("system"),
        merge_consecutive: false,
        leading_user: false,
    };

    #[test]
    fn test_fold_into_first_user_turn() {
        let conversation = normalize(&[Message::system("A"), Message::user("B")], &FOLDING);
        assert_eq!(conversation.turns(), &vec![Turn::new("user", "A\nB")]);
        assert!(conversation.system().is_none());
    }

    #[test]
    fn test_non_consecutive_system_messages_join_in_order() {
        let messages = [
            Message::system("first"),
            Message::user("question"),
            Message::assistant("answer"),
            Message::system("second"),
            Message::user("follow-up"),
        ];
        let conversation = normalize(&messages, &FOLDING);
        let turns = conversation.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content(), "first\nsecond\nquestion");
        assert_eq!(turns[1].role(), "model");
        assert_eq!(turns[2].content(), "follow-up");
    }

    #[test]
    fn test_synthetic_user_turn_when_conversation_starts_with_model() {
        let conversation = normalize(
            &[Message::system("rules"), Message::assistant("hi there")],
            &FOLDING,
        );
        assert_eq!(
            conversation.turns(),
            &vec![Turn::new("user", "rules"), Turn::new("model", "hi there")]
        );
    }

    #[test]
    fn test_system_only_conversation() {
        let conversation = normalize(&[Message::system("only")], &FOLDING);
        assert_eq!(conversation.turns(), &vec![Turn::new("user", "only")]);
    }

    #[test]
    fn test_separate_placement_keeps_turns_clean() {
        let conversation = normalize(&[Message::system("A"), Message::user("B")], &SEPARATE);
        assert_eq!(conversation.system().as_deref(), Some("A"));
        assert_eq!(conversation.turns(), &vec![Turn::new("user", "B")]);
    }

    #[test]
    fn test_merge_consecutive_same_role() {
        let messages = [
            Message::user("one"),
            Message::user("two"),
            Message::assistant("three"),
            Message::user("four"),
        ];
        let conversation = normalize(&messages, &SEPARATE);
        assert_eq!(
            conversation.turns(),
            &vec![
                Turn::new("user", "one\ntwo"),
                Turn::new("assistant", "three"),
                Turn::new("user", "four"),
            ]
        );
    }

    #[test]
    fn test_leading_turn_placement() {
        let messages = [
            Message::user("B"),
            Message::system("A"),
            Message::assistant("C"),
        ];
        let conversation = normalize(&messages, &LEADING);
        assert_eq!(
            conversation.turns(),
            &vec![
                Turn::new("system", "A"),
                Turn::new("user", "B"),
                Turn::new("assistant", "C"),
            ]
        );
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let messages = vec![Message::system("s"), Message::user("u"), Message::assistant("a")];
        let copy = messages.clone();
        let first = serde_json::to_vec(&normalize(&messages, &FOLDING)).unwrap();
        let second = serde_json::to_vec(&normalize(&copy, &FOLDING)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_leading_user_takes_system_prompt() {
        let conversation = normalize(
            &[Message::system("rules"), Message::assistant("hello")],
            &USER_FIRST,
        );
        assert_eq!(
            conversation.turns(),
            &vec![Turn::new("user", "rules"), Turn::new("assistant", "hello")]
        );
        assert!(conversation.system().is_none());
    }

    #[test]
    fn test_leading_user_for_system_only_conversation() {
        let conversation = normalize(&[Message::system("rules")], &USER_FIRST);
        assert_eq!(conversation.turns(), &vec![Turn::new("user", "rules")]);
        assert!(conversation.system().is_none());
    }

    #[test]
    fn test_leading_user_placeholder_without_system() {
        let conversation = normalize(&[Message::assistant("hello")], &USER_FIRST);
        assert_eq!(
            conversation.turns(),
            &vec![
                Turn::new("user", OPENING_USER_TURN),
                Turn::new("assistant", "hello")
            ]
        );
    }

    #[test]
    fn test_leading_user_keeps_separate_system_when_user_opens() {
        let conversation = normalize(
            &[Message::system("rules"), Message::user("hi")],
            &USER_FIRST,
        );
        assert_eq!(conversation.system().as_deref(), Some("rules"));
        assert_eq!(conversation.turns(), &vec![Turn::new("user", "hi")]);
    }
}
