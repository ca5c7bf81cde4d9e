use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Un verrou async par user_id : les écritures d'un même user passent une par une.
/// L'entrée disparaît de la map quand plus personne ne tient ni n'attend le verrou.
#[derive(Default)]
pub struct UserLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Tenu pendant le read-modify-write d'un user
pub struct UserLockGuard<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    user_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, user_id: &str) -> UserLockGuard<'_> {
        // le RefMut du DashMap est relâché avant l'attente
        let lock = self
            .locks
            .entry(user_id.to_string())
            .or_default()
            .clone();

        let guard = lock.lock_owned().await;

        UserLockGuard {
            locks: &self.locks,
            user_id: user_id.to_string(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for UserLockGuard<'_> {
    fn drop(&mut self) {
        // relâche d'abord le mutex (et son Arc), puis retire l'entrée si la map
        // est seule à la référencer. remove_if tient le shard : aucun acquire
        // concurrent ne peut cloner l'Arc pendant le test.
        drop(self.guard.take());
        self.locks
            .remove_if(&self.user_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
