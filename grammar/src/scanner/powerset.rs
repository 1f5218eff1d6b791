use std::collections::VecDeque;
use std::hash::Hash;
use crate::{Map, Set};
use super::dfa::{self, Dfa};
use super::dfa_builder::DfaBuilder;
use super::nfa::{Nfa, State};

/// Subset construction. A DFA state is an epsilon-closed, sorted set of NFA
/// states; it accepts with the value of its best-priority accepting member.
pub(super) fn powerset<A, P, V>(nfa: &Nfa<A, P, V>, start: State) -> Dfa<A, V>
  where A: Eq + Hash + Copy,
        P: PartialOrd + Copy,
        V: Clone,
{
  let mut builder = DfaBuilder::new();
  let mut subsets = Map::<Vec<State>, dfa::State>::default();
  let mut queue = VecDeque::new();

  let start_subset = epsilon_closure(nfa, vec![start]);
  let dfa_start = intern_subset(nfa, &mut builder, &mut subsets, start_subset.clone());
  queue.push_back(start_subset);

  while let Some(subset) = queue.pop_front() {
    let src = subsets[&subset];

    let mut symbols = Set::default();
    for state in &subset {
      if let Some(outgoing) = nfa.state_symbols.get(state) {
        for &c in outgoing {
          symbols.insert(c);
        }
      }
    }

    for c in symbols {
      let mut move_set = vec![];
      for &state in &subset {
        if let Some(dests) = nfa.transitions.get(&(state, Some(c))) {
          move_set.extend(dests.iter().copied());
        }
      }

      let next_subset = epsilon_closure(nfa, move_set);
      let (dest, is_new) = match subsets.get(&next_subset) {
        Some(&dest) => (dest, false),
        None => {
          let dest = intern_subset(nfa, &mut builder, &mut subsets, next_subset.clone());
          (dest, true)
        }
      };

      builder.transition(src, dest, c);
      if is_new {
        queue.push_back(next_subset);
      }
    }
  }

  builder.build(dfa_start)
}

fn intern_subset<A, P, V>(
  nfa: &Nfa<A, P, V>,
  builder: &mut DfaBuilder<A, V>,
  subsets: &mut Map<Vec<State>, dfa::State>,
  subset: Vec<State>,
) -> dfa::State
  where A: Eq + Hash + Copy,
        P: PartialOrd + Copy,
        V: Clone,
{
  let dfa_state = builder.state();

  let mut best: Option<(P, &V)> = None;
  for state in &subset {
    if let Some((priority, value)) = nfa.accept_states.get(state) {
      match best {
        Some((best_priority, _)) if !(*priority < best_priority) => {}
        _ => best = Some((*priority, value)),
      }
    }
  }
  if let Some((_, value)) = best {
    builder.accept(dfa_state, value.clone());
  }

  subsets.insert(subset, dfa_state);
  dfa_state
}

fn epsilon_closure<A, P, V>(nfa: &Nfa<A, P, V>, seed: Vec<State>) -> Vec<State>
  where A: Eq + Hash + Copy,
{
  let mut closure = Set::default();
  let mut queue: VecDeque<State> = seed.into_iter().collect();

  while let Some(state) = queue.pop_front() {
    if !closure.insert(state) {
      continue;
    }
    if let Some(dests) = nfa.transitions.get(&(state, None)) {
      for &dest in dests {
        if !closure.contains(&dest) {
          queue.push_back(dest);
        }
      }
    }
  }

  let mut closure: Vec<State> = closure.into_iter().collect();
  closure.sort();
  closure
}
