use std::fmt;
use grammar::{Grammar, Symbol, TermId};

pub mod builder;
pub mod first;
pub mod report;
pub mod store;
pub mod term_set;

pub use builder::{build_collection, gen_table, Builder, CanonicalCollection};
pub use first::{FirstFollow, FirstFollowOracle};
pub use store::{Item, ItemCore, ItemStore, State, StateId};
pub use term_set::TermSet;

pub type Map<K, V> = indexmap::IndexMap<K, V, fnv::FnvBuildHasher>;
pub type HashMap<K, V> = fnv::FnvHashMap<K, V>;

/// One resolved table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Shift(StateId),
  Goto(StateId),
  Reduce(usize),
  Accept,
}

/// state -> symbol -> action. Only occupied cells are stored; a missing
/// cell is a syntax error at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
  rows: Vec<Map<Symbol, Action>>,
}

impl ParseTable {
  pub fn num_states(&self) -> usize {
    self.rows.len()
  }

  pub fn action(&self, state: StateId, sym: Symbol) -> Option<Action> {
    self.rows.get(state as usize)?.get(&sym).copied()
  }

  pub fn row(&self, state: StateId) -> &Map<Symbol, Action> {
    &self.rows[state as usize]
  }

  pub fn rows(&self) -> &[Map<Symbol, Action>] {
    &self.rows
  }

  /// Renders every row keyed by state id, one occupied cell per line.
  pub fn fmt(&self, grammar: &Grammar, f: &mut impl fmt::Write) -> fmt::Result {
    for (state, row) in self.rows.iter().enumerate() {
      writeln!(f, "State {}", state)?;

      for (&sym, action) in row {
        write!(f, "  {}: ", grammar.symbol_name(sym))?;
        match *action {
          Action::Shift(dest) => writeln!(f, "shift {}", dest)?,
          Action::Goto(dest) => writeln!(f, "goto {}", dest)?,
          Action::Reduce(prod_ix) => {
            writeln!(f, "reduce {}", grammar.prod(prod_ix).to_string(grammar))?
          }
          Action::Accept => writeln!(f, "accept")?,
        }
      }
    }

    Ok(())
  }

  pub fn to_string(&self, grammar: &Grammar) -> String {
    let mut buf = String::new();
    self.fmt(grammar, &mut buf).unwrap();
    buf
  }
}

/// Both actions stay derivable for one `(state, terminal)` cell; the built
/// table keeps whichever write came last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
  ShiftReduce(ShiftReduceConflictError),
  ReduceReduce(ReduceReduceConflictError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftReduceConflictError {
  pub state: StateId,
  pub terminal: TermId,
  pub shift: StateId,
  pub reduce: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceReduceConflictError {
  pub state: StateId,
  pub terminal: TermId,
  pub reduce1: usize,
  pub reduce2: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionWarning {
  UnreachableState(StateId),
}

/// How the reduce pass treats cells the shift pass already filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
  /// later writes win silently.
  Overwrite,
  /// record every clobbered cell, then overwrite anyway; both policies
  /// build the same table.
  ReportConflicts,
}
