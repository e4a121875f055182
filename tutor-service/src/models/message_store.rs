//! Append-only transcript of a session.

use super::ChatTurn;

#[derive(Debug, Default, Clone)]
pub struct MessageStore {
    turns: Vec<ChatTurn>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding only the tutor's greeting.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.append(ChatTurn::welcome());
        store
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn all(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The last `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut store = MessageStore::new();
        store.append(ChatTurn::user("one"));
        store.append(ChatTurn::assistant("two"));

        let texts: Vec<&str> = store.all().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(store.last().map(|t| t.text()), Some("two"));
    }

    #[test]
    fn seeded_store_starts_with_welcome() {
        let store = MessageStore::seeded();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id(), "init-1");
    }

    #[test]
    fn recent_clamps_to_length() {
        let mut store = MessageStore::new();
        assert!(store.recent(10).is_empty());

        for i in 0..4 {
            store.append(ChatTurn::user(i.to_string()));
        }
        assert_eq!(store.recent(10).len(), 4);

        let last_two: Vec<&str> = store.recent(2).iter().map(|t| t.text()).collect();
        assert_eq!(last_two, vec!["2", "3"]);
    }
}
