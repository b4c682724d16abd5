//! State fan-out to player front ends.
//!
//! Observers receive a serialized state string after every accepted
//! change. Each player registers at most one observer and only ever sees
//! the state addressed to them.

use rustc_hash::FxHashMap;

use crate::core::PlayerId;

/// Receives serialized game state.
pub trait GameObserver {
    fn notify(&mut self, state: &str);
}

/// Registered observers, one per player.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: FxHashMap<PlayerId, Box<dyn GameObserver + Send>>,
}

impl ObserverRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer` for `player`, replacing any earlier one.
    pub fn register(&mut self, player: PlayerId, observer: Box<dyn GameObserver + Send>) {
        self.observers.insert(player, observer);
    }

    #[must_use]
    pub fn is_registered(&self, player: PlayerId) -> bool {
        self.observers.contains_key(&player)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver each state to its player's observer, if one is registered.
    pub fn notify_all<'a>(&mut self, states: impl IntoIterator<Item = (PlayerId, &'a str)>) {
        for (player, state) in states {
            if let Some(observer) = self.observers.get_mut(&player) {
                observer.notify(state);
            }
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut players: Vec<_> = self.observers.keys().collect();
        players.sort_unstable();
        f.debug_struct("ObserverRegistry")
            .field("players", &players)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Inbox(Arc<Mutex<Vec<String>>>);

    impl GameObserver for Inbox {
        fn notify(&mut self, state: &str) {
            self.0.lock().unwrap().push(state.to_string());
        }
    }

    #[test]
    fn test_only_registered_players_notified() {
        let mut registry = ObserverRegistry::new();
        let inbox = Inbox::default();
        registry.register(PlayerId::new(1), Box::new(inbox.clone()));

        registry.notify_all([(PlayerId::new(0), "zero"), (PlayerId::new(1), "one")]);

        assert_eq!(*inbox.0.lock().unwrap(), vec!["one".to_string()]);
        assert!(registry.is_registered(PlayerId::new(1)));
        assert!(!registry.is_registered(PlayerId::new(0)));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ObserverRegistry::new();
        let first = Inbox::default();
        let second = Inbox::default();
        registry.register(PlayerId::new(0), Box::new(first.clone()));
        registry.register(PlayerId::new(0), Box::new(second.clone()));

        registry.notify_all([(PlayerId::new(0), "state")]);

        assert!(first.0.lock().unwrap().is_empty());
        assert_eq!(second.0.lock().unwrap().len(), 1);
    }
}
