//! List Operations Module
//!
//! Deque semantics on entries holding list values.

use std::collections::VecDeque;

use crate::cache::store::{validate_key, validate_value};
use crate::cache::{CacheStore, Value};
use crate::error::{CacheError, Result};

/// Which end of a list an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEnd {
    Head,
    Tail,
}

impl CacheStore {
    /// Pushes `value` onto the head of the list at `key` and returns the new
    /// length. Creates the list if the key is absent.
    pub fn lpush(&mut self, key: &str, value: String) -> Result<usize> {
        self.push(key, value, ListEnd::Head)
    }

    /// Pushes `value` onto the tail of the list at `key` and returns the new
    /// length. Creates the list if the key is absent.
    pub fn rpush(&mut self, key: &str, value: String) -> Result<usize> {
        self.push(key, value, ListEnd::Tail)
    }

    pub fn lpop(&mut self, key: &str) -> Result<String> {
        self.pop(key, ListEnd::Head)
    }

    pub fn rpop(&mut self, key: &str) -> Result<String> {
        self.pop(key, ListEnd::Tail)
    }

    // == Push ==
    fn push(&mut self, key: &str, value: String, end: ListEnd) -> Result<usize> {
        validate_key(key)?;
        validate_value(&value)?;
        self.purge_if_expired(key);

        let Some(entry) = self.entries.get_mut(key) else {
            self.make_room()?;
            self.insert_new(key, Value::List(VecDeque::from([value])), 0);
            return Ok(1);
        };

        let list = match &mut entry.value {
            Value::List(list) => list,
            Value::Scalar(_) => return Err(CacheError::TypeMismatch(key.to_string())),
        };
        match end {
            ListEnd::Head => list.push_front(value),
            ListEnd::Tail => list.push_back(value),
        }
        let len = list.len();

        entry.last_touched = self.lru.touch(key, Some(entry.last_touched));
        Ok(len)
    }

    // == Pop ==
    /// Removes one element from `end`. A list emptied by the pop is removed
    /// from the store.
    fn pop(&mut self, key: &str, end: ListEnd) -> Result<String> {
        self.purge_if_expired(key);

        let Some(entry) = self.entries.get_mut(key) else {
            return Err(CacheError::NotFound(key.to_string()));
        };

        let list = match &mut entry.value {
            Value::List(list) => list,
            Value::Scalar(_) => return Err(CacheError::TypeMismatch(key.to_string())),
        };
        let popped = match end {
            ListEnd::Head => list.pop_front(),
            ListEnd::Tail => list.pop_back(),
        };
        let Some(value) = popped else {
            return Err(CacheError::Empty(key.to_string()));
        };

        if list.is_empty() {
            self.remove_entry(key);
        } else {
            entry.last_touched = self.lru.touch(key, Some(entry.last_touched));
        }
        Ok(value)
    }

    // == Range ==
    /// Returns the elements between `start` and `stop` inclusive.
    ///
    /// Negative indices count from the tail (`-1` is the last element) and
    /// out-of-range bounds are clamped. An absent key yields an empty vector;
    /// a key holding a scalar fails with [`CacheError::TypeMismatch`].
    pub fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        self.purge_if_expired(key);

        let Some(entry) = self.entries.get_mut(key) else {
            return Ok(Vec::new());
        };

        let items = match &entry.value {
            Value::List(list) => match normalize_range(list.len(), start, stop) {
                Some((from, to)) => list.range(from..=to).cloned().collect(),
                None => Vec::new(),
            },
            Value::Scalar(_) => return Err(CacheError::TypeMismatch(key.to_string())),
        };

        entry.last_touched = self.lru.touch(key, Some(entry.last_touched));
        Ok(items)
    }

    // == Length ==
    /// Returns the number of elements, or 0 if the key is absent.
    ///
    /// A key holding a scalar fails with [`CacheError::TypeMismatch`].
    pub fn llen(&mut self, key: &str) -> Result<usize> {
        self.purge_if_expired(key);

        let Some(entry) = self.entries.get_mut(key) else {
            return Ok(0);
        };

        let len = match &entry.value {
            Value::List(list) => list.len(),
            Value::Scalar(_) => return Err(CacheError::TypeMismatch(key.to_string())),
        };

        entry.last_touched = self.lru.touch(key, Some(entry.last_touched));
        Ok(len)
    }
}

/// Resolves possibly negative inclusive bounds against a list of `len`
/// elements. Returns `None` when the range selects nothing.
pub fn normalize_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}
