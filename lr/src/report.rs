//! Human-readable rendering of grammar errors, conflicts, and warnings.

use std::fmt::Write;
use grammar::{Grammar, GrammarError};
use crate::{
  ConflictError, ConstructionWarning, ReduceReduceConflictError,
  ShiftReduceConflictError,
};

pub fn report_grammar_error(err: &GrammarError) -> String {
  let mut buf = String::new();

  match err {
    GrammarError::UndeclaredSymbol(name) => {
      writeln!(&mut buf, "undeclared symbol: {}", name).unwrap();
    }
    GrammarError::DuplicateSymbol(name) => {
      writeln!(&mut buf, "duplicate symbol: {}", name).unwrap();
    }
    GrammarError::MissingAugmentation => {
      writeln!(&mut buf, "production 0 is not an augmenting rule").unwrap();
    }
  }

  buf
}

pub fn report_conflicts(grammar: &Grammar, conflicts: &[ConflictError]) -> String {
  let mut buf = String::new();

  for conflict in conflicts {
    match conflict {
      ConflictError::ShiftReduce(err) => report_sr_conflict(grammar, err, &mut buf),
      ConflictError::ReduceReduce(err) => report_rr_conflict(grammar, err, &mut buf),
    }
  }

  buf
}

fn report_sr_conflict(
  grammar: &Grammar,
  err: &ShiftReduceConflictError,
  buf: &mut String,
) {
  writeln!(buf,
    "shift-reduce conflict at state {} on {}:\n\n  shift {}\n\nor reduce by:\n\n  {}\n",
    err.state,
    grammar.term_name(err.terminal),
    err.shift,
    grammar.prod(err.reduce).to_string(grammar),
  ).unwrap();
}

fn report_rr_conflict(
  grammar: &Grammar,
  err: &ReduceReduceConflictError,
  buf: &mut String,
) {
  writeln!(buf,
    "reduce-reduce conflict at state {} on {}:\n\n  {}\n\nor:\n\n  {}\n",
    err.state,
    grammar.term_name(err.terminal),
    grammar.prod(err.reduce1).to_string(grammar),
    grammar.prod(err.reduce2).to_string(grammar),
  ).unwrap();
}

pub fn report_warnings(warnings: &[ConstructionWarning]) -> String {
  let mut buf = String::new();

  for warning in warnings {
    match warning {
      ConstructionWarning::UnreachableState(state) => {
        writeln!(&mut buf, "state {} is unreachable from state 0", state).unwrap();
      }
    }
  }

  buf
}
