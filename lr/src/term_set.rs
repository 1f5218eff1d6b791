use std::fmt::{self, Debug};
use bitvec::prelude::*;
use grammar::TermId;

/// Terminal set over a fixed universe; every set built for one grammar has
/// capacity for the grammar's whole terminal alphabet.
#[derive(Clone, PartialEq, Eq)]
pub struct TermSet {
  bits: BitVec,
}

impl TermSet {
  pub fn new(num_terms: usize) -> Self {
    Self {
      bits: bitvec![0; num_terms],
    }
  }

  pub fn singleton(num_terms: usize, term: TermId) -> Self {
    let mut set = Self::new(num_terms);
    set.insert(term);
    set
  }

  /// true if `term` was not present.
  pub fn insert(&mut self, term: TermId) -> bool {
    let present = self.bits[term.index()];
    self.bits.set(term.index(), true);
    !present
  }

  pub fn contains(&self, term: TermId) -> bool {
    self.bits[term.index()]
  }

  /// Unions `other` into `self`; true if `self` grew.
  pub fn union_with(&mut self, other: &TermSet) -> bool {
    let mut changed = false;
    for i in other.bits.iter_ones() {
      if !self.bits[i] {
        self.bits.set(i, true);
        changed = true;
      }
    }
    changed
  }

  /// terminals in ascending id order.
  pub fn iter(&self) -> impl Iterator<Item = TermId> + '_ {
    self.bits.iter_ones().map(TermId::from_index)
  }

  pub fn len(&self) -> usize {
    self.bits.count_ones()
  }

  pub fn is_empty(&self) -> bool {
    self.bits.not_any()
  }
}

impl Debug for TermSet {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_set().entries(self.bits.iter_ones()).finish()
  }
}
