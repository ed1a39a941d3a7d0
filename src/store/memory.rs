use super::CacheStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

/// In-process implementation of [`CacheStore`].
///
/// A single mutex guards all keys, so every operation is trivially atomic
/// with respect to every other. Intended for tests and for running the
/// embedding application without a Redis instance.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    lists: HashMap<String, Vec<String>>,
    sets: HashMap<String, HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn trim_to_last(list: &mut Vec<String>, capacity: usize) {
    if list.len() > capacity {
        let excess = list.len() - capacity;
        list.drain(..excess);
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn list_replace(&self, key: &str, items: Vec<String>, capacity: usize) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if items.is_empty() {
            inner.lists.remove(key);
            return Ok(());
        }
        let mut items = items;
        trim_to_last(&mut items, capacity);
        inner.lists.insert(key.to_string(), items);
        Ok(())
    }

    async fn list_append(&self, key: &str, item: String, capacity: usize) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let list = inner.lists.entry(key.to_string()).or_default();
        list.push(item);
        trim_to_last(list, capacity);
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>> {
        let inner = self.inner.lock().await;
        Ok(inner.lists.get(key).cloned().unwrap_or_default())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.lists.remove(key);
        inner.sets.remove(key);
        Ok(())
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if let Some(set) = inner.sets.get_mut(key) {
            set.remove(member);
        }
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<HashSet<String>> {
        let inner = self.inner.lock().await;
        Ok(inner.sets.get(key).cloned().unwrap_or_default())
    }
}
