//! compute FIRST, FOLLOW, and NULLABLE sets.

use bittyset::BitSet;
use bitvec::prelude::*;
use grammar::{Grammar, NontermId, Symbol};
use crate::term_set::TermSet;

/// FIRST/FOLLOW queries as the collection and table builders consume them.
pub trait FirstFollowOracle {
  /// Terminals that can begin a derivation of `symbols`.
  fn first(&self, symbols: &[Symbol]) -> TermSet;

  /// Terminals that can follow `nt` in a derivation from the augmented
  /// start; includes `$` when `nt` can end one.
  fn follow(&self, nt: NontermId) -> &TermSet;
}

#[derive(Debug, Clone)]
pub struct FirstFollow {
  first: Vec<TermSet>,
  follow: Vec<TermSet>,
  nullable: BitSet,
  num_terms: usize,
}

impl FirstFollow {
  pub fn compute(grammar: &Grammar) -> FirstFollow {
    let nullable = compute_nullable(grammar);
    let first = compute_first(grammar, &nullable);
    let follow = compute_follow(grammar, &nullable, &first);

    FirstFollow {
      first,
      follow,
      nullable,
      num_terms: grammar.num_terms(),
    }
  }

  pub fn nullable(&self, nt: NontermId) -> bool {
    self.nullable.contains(nt.index())
  }

  pub fn nonterm_first(&self, nt: NontermId) -> &TermSet {
    &self.first[nt.index()]
  }
}

impl FirstFollowOracle for FirstFollow {
  fn first(&self, symbols: &[Symbol]) -> TermSet {
    let mut set = TermSet::new(self.num_terms);
    for &sym in symbols {
      match sym {
        Symbol::Term(term) => {
          set.insert(term);
          break;
        }
        Symbol::Nonterm(nt) => {
          set.union_with(&self.first[nt.index()]);
          if !self.nullable.contains(nt.index()) {
            break;
          }
        }
      }
    }
    set
  }

  fn follow(&self, nt: NontermId) -> &TermSet {
    &self.follow[nt.index()]
  }
}

fn compute_first(grammar: &Grammar, nullable: &BitSet) -> Vec<TermSet> {
  let mut first = vec![None; grammar.num_nonterms()];

  for i in 0..grammar.num_nonterms() {
    compute_nonterm_first(
      grammar,
      nullable,
      &mut first,
      &mut BitSet::new(),
      NontermId::from_index(i),
    );
  }

  first.into_iter()
    .map(|set| set.unwrap_or_else(|| TermSet::new(grammar.num_terms())))
    .collect()
}

fn compute_nonterm_first(
  grammar: &Grammar,
  nullable: &BitSet,
  first: &mut Vec<Option<TermSet>>,
  visiting: &mut BitSet,
  nt: NontermId,
) {
  if first[nt.index()].is_some() || visiting.contains(nt.index()) {
    return;
  }

  let mut nt_first = TermSet::new(grammar.num_terms());

  for &prod_ix in grammar.prods_of(nt) {
    for sym in &grammar.prod(prod_ix).symbols {
      match sym {
        Symbol::Term(term) => {
          nt_first.insert(*term);
          break;
        }
        Symbol::Nonterm(nt_sym) => {
          let already_visiting = visiting.contains(nt.index());
          visiting.insert(nt.index());
          compute_nonterm_first(grammar, nullable, first, visiting, *nt_sym);
          if !already_visiting {
            visiting.remove(nt.index());
          }

          if let Some(nt_sym_first) = &first[nt_sym.index()] {
            nt_first.union_with(nt_sym_first);
          }

          if !nullable.contains(nt_sym.index()) {
            break;
          }
        }
      }
    }
  }

  first[nt.index()] = Some(nt_first);
}

fn compute_nullable(grammar: &Grammar) -> BitSet {
  let mut prods_nullable = bitvec![0; grammar.prods().len()];
  let mut prods_completed = bitvec![0; grammar.prods().len()];

  loop {
    let mut changed = false;

    'outer: for (i, prod) in grammar.prods().iter().enumerate() {
      if prods_completed[i] {
        continue;
      }

      let mut prod_nullable = true;
      for sym in &prod.symbols {
        match sym {
          Symbol::Term(_) => {
            prod_nullable = false;
            break;
          }
          Symbol::Nonterm(nt) => {
            let nt_prods = grammar.prods_of(*nt);
            if nt_prods.iter().all(|&p| prods_completed[p]) {
              if !nt_prods.iter().any(|&p| prods_nullable[p]) {
                prod_nullable = false;
                break;
              }
            } else {
              continue 'outer;
            }
          }
        }
      }

      prods_nullable.set(i, prod_nullable);
      prods_completed.set(i, true);
      changed = true;
    }

    if !changed {
      break;
    }
  }

  (0..grammar.num_nonterms())
    .filter(|&i| {
      grammar.prods_of(NontermId::from_index(i)).iter().any(|&p| prods_nullable[p])
    })
    .collect()
}

/// Iterated fixpoint. `$` is seeded into the follow set of the augmenting
/// LHS before the first pass.
fn compute_follow(grammar: &Grammar, nullable: &BitSet, first: &[TermSet]) -> Vec<TermSet> {
  let num_terms = grammar.num_terms();
  let mut follow = vec![TermSet::new(num_terms); grammar.num_nonterms()];

  if let Some(prod) = grammar.prods().first() {
    follow[prod.lhs.index()].insert(grammar.eof());
  }

  loop {
    let mut changed = false;

    for prod in grammar.prods() {
      let mut sym_follow: Option<TermSet> = None;
      for sym in prod.symbols.iter().rev() {
        match sym {
          Symbol::Term(term) => {
            sym_follow = Some(TermSet::singleton(num_terms, *term));
          }
          Symbol::Nonterm(nt) => {
            let sf = match &sym_follow {
              Some(sf) => sf.clone(),
              None => follow[prod.lhs.index()].clone(),
            };

            changed |= follow[nt.index()].union_with(&sf);

            sym_follow = Some(if nullable.contains(nt.index()) {
              let mut next = sf;
              next.union_with(&first[nt.index()]);
              next
            } else {
              first[nt.index()].clone()
            });
          }
        }
      }
    }

    if !changed {
      break;
    }
  }

  follow
}

#[cfg(test)]
mod tests {
  use super::*;
  use grammar::Grammar;
  use pretty_assertions::assert_eq;

  fn names(grammar: &Grammar, set: &TermSet) -> Vec<String> {
    set.iter().map(|term| grammar.term_name(term).to_owned()).collect()
  }

  fn nt(grammar: &Grammar, name: &str) -> NontermId {
    grammar.nonterm(name).unwrap()
  }

  fn simple() -> Grammar {
    Grammar::build(
      &["Z'", "Z", "Y", "X"],
      &["a", "c", "d"],
      &[
        ("Z'", vec!["Z"]),
        ("Z", vec!["d"]),
        ("Z", vec!["X", "Y", "Z"]),
        ("Y", vec![]),
        ("Y", vec!["c"]),
        ("X", vec!["Y"]),
        ("X", vec!["a"]),
      ],
    ).unwrap()
  }

  #[test]
  fn nullable() {
    let grammar = simple();
    let ffn = FirstFollow::compute(&grammar);

    assert!(!ffn.nullable(nt(&grammar, "Z'")));
    assert!(!ffn.nullable(nt(&grammar, "Z")));
    assert!(ffn.nullable(nt(&grammar, "Y")));
    assert!(ffn.nullable(nt(&grammar, "X")));
  }

  #[test]
  fn first_of_nonterminals() {
    let grammar = simple();
    let ffn = FirstFollow::compute(&grammar);

    assert_eq!(names(&grammar, ffn.nonterm_first(nt(&grammar, "Z'"))), ["a", "c", "d"]);
    assert_eq!(names(&grammar, ffn.nonterm_first(nt(&grammar, "Z"))), ["a", "c", "d"]);
    assert_eq!(names(&grammar, ffn.nonterm_first(nt(&grammar, "Y"))), ["c"]);
    assert_eq!(names(&grammar, ffn.nonterm_first(nt(&grammar, "X"))), ["a", "c"]);
  }

  #[test]
  fn first_of_sequences() {
    let grammar = simple();
    let ffn = FirstFollow::compute(&grammar);
    let x = Symbol::Nonterm(nt(&grammar, "X"));
    let y = Symbol::Nonterm(nt(&grammar, "Y"));
    let z = Symbol::Nonterm(nt(&grammar, "Z"));
    let d = Symbol::Term(grammar.term("d").unwrap());

    // nullable prefixes fall through, the first non-nullable symbol stops.
    assert_eq!(names(&grammar, &ffn.first(&[x, d])), ["a", "c", "d"]);
    assert_eq!(names(&grammar, &ffn.first(&[y, z])), ["a", "c", "d"]);
    assert_eq!(names(&grammar, &ffn.first(&[z, d])), ["a", "c", "d"]);
    assert_eq!(names(&grammar, &ffn.first(&[d, x])), ["d"]);
    assert!(ffn.first(&[]).is_empty());
  }

  #[test]
  fn follow_sets() {
    let grammar = simple();
    let ffn = FirstFollow::compute(&grammar);

    assert_eq!(names(&grammar, ffn.follow(nt(&grammar, "Z'"))), ["$"]);
    assert_eq!(names(&grammar, ffn.follow(nt(&grammar, "Z"))), ["$"]);
    assert_eq!(names(&grammar, ffn.follow(nt(&grammar, "Y"))), ["a", "c", "d"]);
    assert_eq!(names(&grammar, ffn.follow(nt(&grammar, "X"))), ["a", "c", "d"]);
  }

  #[test]
  fn left_recursive_first() {
    let grammar = Grammar::build(
      &["E'", "E", "T"],
      &["plus", "num"],
      &[
        ("E'", vec!["E"]),
        ("E", vec!["E", "plus", "T"]),
        ("E", vec!["T"]),
        ("T", vec!["num"]),
      ],
    ).unwrap();
    let ffn = FirstFollow::compute(&grammar);

    assert_eq!(names(&grammar, ffn.nonterm_first(nt(&grammar, "E"))), ["num"]);
    assert_eq!(names(&grammar, ffn.follow(nt(&grammar, "E"))), ["plus", "$"]);
    assert_eq!(names(&grammar, ffn.follow(nt(&grammar, "T"))), ["plus", "$"]);
  }
}
