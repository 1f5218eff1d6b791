use std::hash::Hash;
use crate::HashMap;

#[derive(Debug)]
pub struct Dfa<A, V> {
  pub(super) start: u32,
  pub(super) transitions: HashMap<(State, A), State>,
  pub(super) accept_states: HashMap<State, V>,
}

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct State(pub(super) u32);

impl<A, V> Dfa<A, V>
  where A: Eq + Hash + Copy,
{
  pub fn start(&self) -> State {
    State(self.start)
  }

  pub fn transition(&self, state: State, c: A) -> Option<State> {
    self.transitions.get(&(state, c)).copied()
  }

  /// if the state is an accepting state, return its value.
  pub fn result(&self, state: State) -> Option<&V> {
    self.accept_states.get(&state)
  }

  pub fn accepts(&self, input: &[A]) -> bool {
    let mut state = self.start();
    for &c in input {
      match self.transition(state, c) {
        Some(next) => state = next,
        None => return false,
      }
    }
    self.result(state).is_some()
  }
}
