//! In-memory mirror of serialized values.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Point-in-time stamp of a key's mirror state, taken before a disk read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Generation {
  epoch: u64,
  stamp: Option<u64>,
}

#[derive(Debug, Default)]
struct MirrorState {
  enabled: bool,
  entries: HashMap<String, String>,
  /// Bumped on every enable/disable transition
  epoch: u64,
  /// Last mutation counter value per key, since the last transition
  stamps: HashMap<String, u64>,
  counter: u64,
}

impl MirrorState {
  fn touch(&mut self, key: &str) {
    self.counter += 1;
    self.stamps.insert(key.to_string(), self.counter);
  }

  fn reset(&mut self, enabled: bool) {
    self.entries.clear();
    self.stamps.clear();
    self.epoch += 1;
    self.enabled = enabled;
  }
}

/// Key -> serialized string mirror that lets reads skip the filesystem.
///
/// Holds the exact text last written or read, never parsed values. Every
/// enable/disable transition clears it. Writes while disabled are ignored.
#[derive(Debug, Default)]
pub(crate) struct Mirror {
  state: Mutex<MirrorState>,
}

impl Mirror {
  pub fn new(enabled: bool) -> Self {
    Self {
      state: Mutex::new(MirrorState {
        enabled,
        ..MirrorState::default()
      }),
    }
  }

  // The state is consistent after every method, so a poisoned lock is safe to reuse.
  fn lock(&self) -> MutexGuard<'_, MirrorState> {
    self.state.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// Enable and clear. Returns false if it was already enabled (nothing cleared).
  pub fn enable(&self) -> bool {
    let mut state = self.lock();
    if state.enabled {
      return false;
    }
    state.reset(true);
    true
  }

  /// Disable and clear. Returns false if it was already disabled.
  pub fn disable(&self) -> bool {
    let mut state = self.lock();
    if !state.enabled {
      return false;
    }
    state.reset(false);
    true
  }

  pub fn is_enabled(&self) -> bool {
    self.lock().enabled
  }

  /// Mirrored text for `key`, or None when disabled or missing.
  pub fn get(&self, key: &str) -> Option<String> {
    let state = self.lock();
    if !state.enabled {
      return None;
    }
    state.entries.get(key).cloned()
  }

  /// Record a completed write.
  pub fn set(&self, key: &str, content: &str) {
    let mut state = self.lock();
    if state.enabled {
      state.touch(key);
      state.entries.insert(key.to_string(), content.to_string());
    }
  }

  /// Record a completed delete.
  pub fn remove(&self, key: &str) {
    let mut state = self.lock();
    if state.enabled {
      state.touch(key);
      state.entries.remove(key);
    }
  }

  pub fn generation(&self, key: &str) -> Generation {
    let state = self.lock();
    Generation {
      epoch: state.epoch,
      stamp: state.stamps.get(key).copied(),
    }
  }

  /// Insert text read from disk, unless the key was written, removed, or the
  /// mirror toggled since `seen` was taken. Returns whether it was inserted.
  pub fn fill(&self, key: &str, content: &str, seen: Generation) -> bool {
    let mut state = self.lock();
    let current = Generation {
      epoch: state.epoch,
      stamp: state.stamps.get(key).copied(),
    };
    if !state.enabled || current != seen {
      return false;
    }
    state.entries.insert(key.to_string(), content.to_string());
    true
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.lock().entries.len()
  }

  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
