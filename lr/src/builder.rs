//! Canonical collection construction: a closure/goto fixpoint over a FIFO
//! worklist, plus reachability checking and introspection over the result.

mod states;
mod tables;

use std::collections::VecDeque;
use std::fmt::{self, Write};
use grammar::{Grammar, GrammarError, Symbol};
use itertools::Itertools;
use crate::first::FirstFollowOracle;
use crate::store::{ItemCore, ItemStore, StateId};
use crate::term_set::TermSet;
use crate::{ConstructionWarning, Map};

pub use tables::gen_table;

pub struct Builder<'a, F> {
  grammar: &'a Grammar,
  oracle: &'a F,
  store: ItemStore,
}

impl<'a, F> Builder<'a, F>
  where F: FirstFollowOracle,
{
  pub fn new(grammar: &'a Grammar, oracle: &'a F) -> Self {
    Builder {
      grammar,
      oracle,
      store: ItemStore::new(),
    }
  }

  /// Runs the worklist fixpoint. Fails when production 0 does not have the
  /// augmenting shape `S' -> S`, with `S'` owning no other production and
  /// appearing on no RHS.
  pub fn build(mut self) -> Result<CanonicalCollection, GrammarError> {
    let augmented = match self.grammar.prods().first() {
      Some(prod) => {
        prod.symbols.len() == 1
          && matches!(prod.symbols[0], Symbol::Nonterm(_))
          && self.grammar.prods_of(prod.lhs).len() == 1
          && self.grammar.prods().iter()
            .all(|p| !p.symbols.contains(&Symbol::Nonterm(prod.lhs)))
      }
      None => false,
    };
    if !augmented {
      return Err(GrammarError::MissingAugmentation);
    }

    states::gen_states(self.grammar, self.oracle, &mut self.store);

    Ok(CanonicalCollection { store: self.store })
  }
}

pub fn build_collection<F>(
  grammar: &Grammar,
  oracle: &F,
) -> Result<CanonicalCollection, GrammarError>
  where F: FirstFollowOracle,
{
  Builder::new(grammar, oracle).build()
}

/// The finished collection: every state, its closed item set, and the
/// transition relation. State 0 is the start state.
#[derive(Debug)]
pub struct CanonicalCollection {
  store: ItemStore,
}

impl CanonicalCollection {
  pub fn num_states(&self) -> usize {
    self.store.num_states()
  }

  pub fn start_state(&self) -> StateId {
    0
  }

  /// Items of a state in construction order: kernel first, then derived.
  pub fn state_items<'s>(
    &'s self,
    state: StateId,
  ) -> impl Iterator<Item = (ItemCore, &'s TermSet)> + 's {
    self.store.state(state).items.iter().map(move |&id| {
      let item = self.store.item(id);
      (item.core, &item.lookaheads)
    })
  }

  pub fn transitions(&self, state: StateId) -> &Map<Symbol, StateId> {
    &self.store.state(state).transitions
  }

  /// Every edge, grouped by source state in id order.
  pub fn edges(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
    self.store.states().flat_map(|(src, state)| {
      state.transitions.iter().map(move |(&sym, &dest)| (src, sym, dest))
    })
  }

  /// States with no path from state 0.
  pub fn check_reachability(&self) -> Vec<ConstructionWarning> {
    let mut reached = vec![false; self.num_states()];
    let mut queue = VecDeque::new();

    reached[0] = true;
    queue.push_back(self.start_state());

    while let Some(state) = queue.pop_front() {
      for (_, &dest) in self.transitions(state) {
        if !reached[dest as usize] {
          reached[dest as usize] = true;
          queue.push_back(dest);
        }
      }
    }

    reached.iter()
      .enumerate()
      .filter(|&(_, reached)| !reached)
      .map(|(i, _)| ConstructionWarning::UnreachableState(i as StateId))
      .collect()
  }

  pub fn fmt_states(&self, grammar: &Grammar, fmt: &mut impl Write) -> fmt::Result {
    for (state, _) in self.store.states() {
      write!(fmt, "State {}", state)?;
      if state == self.start_state() {
        write!(fmt, " (start)")?;
      }
      writeln!(fmt)?;

      for (core, lookaheads) in self.state_items(state) {
        fmt_item(grammar, core, lookaheads, fmt)?;
        writeln!(fmt)?;
      }

      writeln!(fmt)?;
    }

    Ok(())
  }

  pub fn states_dump(&self, grammar: &Grammar) -> String {
    let mut buf = String::new();
    self.fmt_states(grammar, &mut buf).unwrap();
    buf
  }
}

fn fmt_item(
  grammar: &Grammar,
  core: ItemCore,
  lookaheads: &TermSet,
  f: &mut impl Write,
) -> fmt::Result {
  let prod = grammar.prod(core.prod_ix);

  write!(f, "{} ->", grammar.nonterm_name(prod.lhs))?;

  for (i, &sym) in prod.symbols.iter().enumerate() {
    if i == core.dot_ix {
      write!(f, " .")?;
    }
    write!(f, " {}", grammar.symbol_name(sym))?;
  }

  if core.dot_ix == prod.symbols.len() {
    write!(f, " .")?;
  }

  if !lookaheads.is_empty() {
    write!(f, "      {}", lookaheads.iter().map(|t| grammar.term_name(t)).join(" "))?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use grammar::Grammar;
  use insta::assert_snapshot;
  use pretty_assertions::assert_eq;
  use crate::first::FirstFollow;

  fn prepare(grammar: &Grammar) -> CanonicalCollection {
    let ffn = FirstFollow::compute(grammar);
    build_collection(grammar, &ffn).unwrap()
  }

  fn simple() -> Grammar {
    Grammar::build(
      &["S'", "S", "C"],
      &["c", "d"],
      &[
        ("S'", vec!["S"]),
        ("S", vec!["C", "C"]),
        ("C", vec!["c", "C"]),
        ("C", vec!["d"]),
      ],
    ).unwrap()
  }

  #[test]
  fn simple_states() {
    let grammar = simple();
    let collection = prepare(&grammar);

    assert_snapshot!(collection.states_dump(&grammar).trim_end(), @r###"
    State 0 (start)
    S' -> . S      c d
    S -> . C C      c d
    C -> . c C      c d
    C -> . d      c d

    State 1
    S' -> S .      c d

    State 2
    S -> C . C      c d
    C -> . c C      c d
    C -> . d      c d

    State 3
    C -> c . C      c d
    C -> . c C      c d
    C -> . d      c d

    State 4
    C -> d .      c d

    State 5
    S -> C C .      c d

    State 6
    C -> c C .      c d
    "###);
  }

  #[test]
  fn simple_merges_structurally_equal_states() {
    let grammar = simple();
    let collection = prepare(&grammar);
    let c = Symbol::Term(grammar.term("c").unwrap());
    let d = Symbol::Term(grammar.term("d").unwrap());

    assert_eq!(collection.num_states(), 7);

    // every c shift lands in the one c-kernel state, likewise for d.
    assert_eq!(collection.transitions(0)[&c], 3);
    assert_eq!(collection.transitions(2)[&c], 3);
    assert_eq!(collection.transitions(3)[&c], 3);
    assert_eq!(collection.transitions(0)[&d], 4);
    assert_eq!(collection.transitions(2)[&d], 4);
    assert_eq!(collection.transitions(3)[&d], 4);
  }

  #[test]
  fn simple_edges() {
    let grammar = simple();
    let collection = prepare(&grammar);
    let sym = |name: &str| match grammar.nonterm(name) {
      Some(nt) => Symbol::Nonterm(nt),
      None => Symbol::Term(grammar.term(name).unwrap()),
    };

    let edges = collection.edges().collect::<Vec<_>>();
    assert_eq!(edges, vec![
      (0, sym("S"), 1),
      (0, sym("C"), 2),
      (0, sym("c"), 3),
      (0, sym("d"), 4),
      (2, sym("C"), 5),
      (2, sym("c"), 3),
      (2, sym("d"), 4),
      (3, sym("C"), 6),
      (3, sym("c"), 3),
      (3, sym("d"), 4),
    ]);
  }

  #[test]
  fn lookaheads_discarded_on_structural_hit() {
    // A's item lands in the same x-state from both branches, first with
    // lookahead c, then with d; the second arrival must not change it.
    let grammar = Grammar::build(
      &["S'", "S", "A"],
      &["a", "b", "c", "d", "x"],
      &[
        ("S'", vec!["S"]),
        ("S", vec!["a", "A", "c"]),
        ("S", vec!["b", "A", "d"]),
        ("A", vec!["x"]),
      ],
    ).unwrap();
    let collection = prepare(&grammar);
    let x = Symbol::Term(grammar.term("x").unwrap());

    let from_a = collection.transitions(2)[&x];
    let from_b = collection.transitions(3)[&x];
    assert_eq!(from_a, from_b);

    let items = collection.state_items(from_a).collect::<Vec<_>>();
    assert_eq!(items.len(), 1);
    let (core, lookaheads) = items[0];
    assert_eq!(core, ItemCore { prod_ix: 3, dot_ix: 1 });
    assert_eq!(
      lookaheads.iter().collect::<Vec<_>>(),
      vec![grammar.term("c").unwrap()],
    );
  }

  #[test]
  fn left_recursion_terminates() {
    let grammar = Grammar::build(
      &["A'", "A"],
      &["a", "b"],
      &[
        ("A'", vec!["A"]),
        ("A", vec!["A", "a"]),
        ("A", vec!["b"]),
      ],
    ).unwrap();
    let collection = prepare(&grammar);

    assert_eq!(collection.num_states(), 4);
    assert_snapshot!(collection.states_dump(&grammar).trim_end(), @r###"
    State 0 (start)
    A' -> . A      b
    A -> . A a      a b
    A -> . b      a b

    State 1
    A' -> A .      b
    A -> A . a      a b

    State 2
    A -> b .      a b

    State 3
    A -> A a .      a b
    "###);
  }

  #[test]
  fn epsilon_production_closes_to_completed_item() {
    let grammar = Grammar::build(
      &["S'", "S", "A"],
      &["a", "b"],
      &[
        ("S'", vec!["S"]),
        ("S", vec!["A", "b"]),
        ("A", vec![]),
        ("A", vec!["a"]),
      ],
    ).unwrap();
    let collection = prepare(&grammar);

    let items = collection.state_items(0).collect::<Vec<_>>();
    let (core, lookaheads) = items[2];
    assert_eq!(core, ItemCore { prod_ix: 2, dot_ix: 0 });
    assert_eq!(
      lookaheads.iter().collect::<Vec<_>>(),
      vec![grammar.term("b").unwrap()],
    );
  }

  #[test]
  fn missing_augmentation() {
    let grammar = Grammar::build(
      &["S"],
      &["c"],
      &[("S", vec!["c"])],
    ).unwrap();
    let ffn = FirstFollow::compute(&grammar);

    assert_eq!(
      build_collection(&grammar, &ffn).unwrap_err(),
      GrammarError::MissingAugmentation,
    );

    let empty = Grammar::build(&["S"], &["c"], &[]).unwrap();
    let ffn = FirstFollow::compute(&empty);
    assert_eq!(
      build_collection(&empty, &ffn).unwrap_err(),
      GrammarError::MissingAugmentation,
    );

    // the augmenting nonterminal owns exactly one production.
    let doubled = Grammar::build(
      &["S'", "S"],
      &["c"],
      &[("S'", vec!["S"]), ("S'", vec!["c"]), ("S", vec!["c"])],
    ).unwrap();
    let ffn = FirstFollow::compute(&doubled);
    assert_eq!(
      build_collection(&doubled, &ffn).unwrap_err(),
      GrammarError::MissingAugmentation,
    );
  }

  #[test]
  fn all_states_reachable() {
    let grammar = simple();
    let collection = prepare(&grammar);

    assert_eq!(collection.check_reachability(), vec![]);
  }

  #[test]
  fn deterministic_across_runs() {
    let grammar = simple();
    let first_run = prepare(&grammar);
    let second_run = prepare(&grammar);

    assert_eq!(
      first_run.states_dump(&grammar),
      second_run.states_dump(&grammar),
    );
    assert_eq!(
      first_run.edges().collect::<Vec<_>>(),
      second_run.edges().collect::<Vec<_>>(),
    );
  }
}
