use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{ApplicationId, ApplicationRecord, Posting, PostingId};
use super::repository::{
    ApplicationRepository, Notification, NotificationError, NotificationPublisher,
    PostingRepository, RepositoryError,
};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K, V> Table<K, V>
where
    K: std::hash::Hash + Eq + Clone,
    V: Clone,
{
    fn insert(&mut self, key: K, value: V) -> Result<(), RepositoryError> {
        if self.rows.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        self.order.push(key.clone());
        self.rows.insert(key, value);
        Ok(())
    }

    fn replace(&mut self, key: &K, value: V) -> Result<(), RepositoryError> {
        match self.rows.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn ordered(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|key| self.rows.get(key))
    }
}

/// Posting storage held in process memory.
#[derive(Default, Clone)]
pub struct InMemoryPostingRepository {
    table: Arc<Mutex<Table<PostingId, Posting>>>,
}

impl PostingRepository for InMemoryPostingRepository {
    fn insert(&self, posting: Posting) -> Result<Posting, RepositoryError> {
        lock(&self.table)?.insert(posting.id.clone(), posting.clone())?;
        Ok(posting)
    }

    fn update(&self, posting: Posting) -> Result<(), RepositoryError> {
        let id = posting.id.clone();
        lock(&self.table)?.replace(&id, posting)
    }

    fn fetch(&self, id: &PostingId) -> Result<Option<Posting>, RepositoryError> {
        Ok(lock(&self.table)?.rows.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Posting>, RepositoryError> {
        Ok(lock(&self.table)?.ordered().cloned().collect())
    }
}

/// Application storage held in process memory.
#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    table: Arc<Mutex<Table<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        lock(&self.table)?.insert(record.id.clone(), record.clone())?;
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let id = record.id.clone();
        lock(&self.table)?.replace(&id, record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(lock(&self.table)?.rows.get(id).cloned())
    }

    fn for_posting(
        &self,
        posting_id: &PostingId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(lock(&self.table)?
            .ordered()
            .filter(|record| record.posting_id == *posting_id)
            .cloned()
            .collect())
    }
}

/// Publisher that keeps every notification so callers can render or assert on them.
#[derive(Default, Clone)]
pub struct InMemoryNotifications {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotifications {
    pub fn events(&self) -> Vec<Notification> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl NotificationPublisher for InMemoryNotifications {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .map_err(|_| NotificationError::Transport("notification mutex poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}
