//! Arena for item and state records. States deduplicate on the structural
//! key of their closed item set.

use grammar::Symbol;
use crate::Map;
use crate::term_set::TermSet;

pub type StateId = u32;
pub type ItemId = usize;

/// Structural identity of an item. Lookaheads are deliberately excluded, so
/// states whose items differ only in lookahead content unify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemCore {
  pub prod_ix: usize,
  pub dot_ix: usize,
}

#[derive(Debug, Clone)]
pub struct Item {
  pub core: ItemCore,
  pub lookaheads: TermSet,
}

#[derive(Debug)]
pub struct State {
  /// arena ids of the closed item set, kernel first.
  pub items: Vec<ItemId>,
  /// at most one edge per symbol, in discovery order.
  pub transitions: Map<Symbol, StateId>,
}

#[derive(Debug, Default)]
pub struct ItemStore {
  items: Vec<Item>,
  states: Vec<State>,
  state_keys: Map<Vec<ItemCore>, StateId>,
}

impl ItemStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn num_items(&self) -> usize {
    self.items.len()
  }

  pub fn num_states(&self) -> usize {
    self.states.len()
  }

  pub fn item(&self, id: ItemId) -> &Item {
    &self.items[id]
  }

  pub fn state(&self, id: StateId) -> &State {
    &self.states[id as usize]
  }

  pub(crate) fn state_mut(&mut self, id: StateId) -> &mut State {
    &mut self.states[id as usize]
  }

  pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
    self.states.iter().enumerate().map(|(i, state)| (i as StateId, state))
  }

  /// Looks up the state registered under this structural key; `key` must be
  /// sorted.
  pub fn lookup_state(&self, key: &[ItemCore]) -> Option<StateId> {
    self.state_keys.get(key).copied()
  }

  /// Registers a state under `key`, allocating its items into the arena.
  /// On a key hit the passed items are dropped and the existing id comes
  /// back with `false`.
  pub(crate) fn intern_state(&mut self, key: Vec<ItemCore>, items: Vec<Item>) -> (StateId, bool) {
    if let Some(&id) = self.state_keys.get(&key) {
      return (id, false);
    }

    let id = self.states.len() as StateId;
    let item_ids = items.into_iter()
      .map(|item| {
        let item_id = self.items.len();
        self.items.push(item);
        item_id
      })
      .collect();

    self.states.push(State {
      items: item_ids,
      transitions: Map::default(),
    });
    self.state_keys.insert(key, id);

    (id, true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use grammar::TermId;
  use pretty_assertions::assert_eq;

  fn item(prod_ix: usize, dot_ix: usize, lookahead: usize) -> Item {
    Item {
      core: ItemCore { prod_ix, dot_ix },
      lookaheads: TermSet::singleton(4, TermId::from_index(lookahead)),
    }
  }

  fn key_of(items: &[Item]) -> Vec<ItemCore> {
    let mut key: Vec<ItemCore> = items.iter().map(|item| item.core).collect();
    key.sort();
    key
  }

  #[test]
  fn interns_new_states() {
    let mut store = ItemStore::new();
    let a = vec![item(0, 0, 1)];
    let b = vec![item(1, 1, 2), item(2, 0, 2)];

    let (s0, new0) = store.intern_state(key_of(&a), a);
    let (s1, new1) = store.intern_state(key_of(&b), b);

    assert!(new0 && new1);
    assert_eq!((s0, s1), (0, 1));
    assert_eq!(store.num_states(), 2);
    assert_eq!(store.num_items(), 3);
    assert_eq!(store.state(s1).items, vec![1, 2]);
  }

  #[test]
  fn key_hit_returns_existing_state() {
    let mut store = ItemStore::new();
    let a = vec![item(0, 0, 1), item(1, 0, 1)];
    let (s0, _) = store.intern_state(key_of(&a), a);

    // same cores, different lookahead: still the same state.
    let b = vec![item(0, 0, 3), item(1, 0, 3)];
    let (s1, is_new) = store.intern_state(key_of(&b), b);

    assert!(!is_new);
    assert_eq!(s0, s1);
    assert_eq!(store.num_states(), 1);
    assert_eq!(store.num_items(), 2);
  }

  #[test]
  fn lookup_by_sorted_key() {
    let mut store = ItemStore::new();
    let a = vec![item(2, 1, 0), item(0, 0, 0)];
    let key = key_of(&a);
    let (s0, _) = store.intern_state(key.clone(), a);

    assert_eq!(store.lookup_state(&key), Some(s0));
    assert_eq!(store.lookup_state(&[ItemCore { prod_ix: 9, dot_ix: 0 }]), None);
  }
}
