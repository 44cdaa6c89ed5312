pub mod stream;

/// Convenience helper for handing the latest snapshot of a value from the
/// component producing it to the one rendering it. Only the most recent
/// value is retained; publishing overwrites any unread snapshot.
#[derive(Clone, Default)]
pub struct SnapshotStore<T>(std::sync::Arc<std::sync::Mutex<Option<T>>>);

impl<T: Clone> SnapshotStore<T> {
    /// Publishes `value` as the latest snapshot.
    ///
    /// # Panics
    ///
    /// If the locking the interally used mutex fails.
    pub fn publish(&self, value: T) {
        let mut data = self.0.lock().unwrap();
        let _ = data.insert(value);
    }

    /// Takes the latest unread snapshot, if any.
    ///
    /// # Panics
    ///
    /// If the locking of the mutex fails
    pub fn take(&self) -> Option<T> {
        let mut data = self.0.lock().unwrap();
        data.take()
    }
}

#[test]
fn test_snapshot_store_keeps_latest() {
    let store = SnapshotStore::default();

    assert_eq!(store.take(), None::<i32>);

    store.publish(1);
    store.publish(2);
    assert_eq!(store.take(), Some(2));
    assert_eq!(store.take(), None);
}
