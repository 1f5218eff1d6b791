use std::fmt::{self, Debug};
use std::hash::Hash;
use crate::{Map, Set};
use super::dfa::Dfa;
use super::nfa_builder::NfaBuilder;

/// Nondeterministic automaton over alphabet `A`. A `None` transition label
/// is an epsilon move. Accepting states carry a priority `P` (lower wins
/// when a DFA subset contains several) and a value `V`.
#[derive(Debug)]
pub struct Nfa<A, P, V> {
  pub(super) transitions: Map<(State, Option<A>), Set<State>>,
  /// non-epsilon symbols leaving each state.
  pub(super) state_symbols: Map<State, Set<A>>,
  pub(super) accept_states: Map<State, (P, V)>,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct State(pub(super) u32);

impl<A, P, V> Nfa<A, P, V>
  where A: Eq + Hash + Copy,
        P: PartialOrd,
{
  pub fn builder() -> NfaBuilder<A, P, V> {
    NfaBuilder::new()
  }
}

impl<A, P, V> Nfa<A, P, V>
  where A: Eq + Hash + Copy,
        P: PartialOrd + Copy,
        V: Clone,
{
  pub fn to_dfa(&self, start: State) -> Dfa<A, V> {
    super::powerset::powerset(self, start)
  }
}

impl Debug for State {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "State({})", self.0)
  }
}
