use grammar::{Grammar, Symbol};
use crate::first::FirstFollowOracle;
use crate::store::StateId;
use crate::{
  Action, ConflictError, ConflictPolicy, Map, ParseTable,
  ReduceReduceConflictError, ShiftReduceConflictError,
};
use super::CanonicalCollection;

/// Assembles the action table in two passes: shift/goto cells from the
/// transition relation (plus the synthetic accept cell in state 0), then
/// FOLLOW-driven reduce cells that overwrite whatever the first pass left.
/// Under `ReportConflicts` every clobbered cell is recorded before the
/// overwrite happens, so the table itself is policy-independent.
pub fn gen_table<F>(
  grammar: &Grammar,
  oracle: &F,
  collection: &CanonicalCollection,
  policy: ConflictPolicy,
) -> (ParseTable, Vec<ConflictError>)
  where F: FirstFollowOracle,
{
  let num_states = collection.num_states();
  let mut rows: Vec<Map<Symbol, Action>> = (0..num_states).map(|_| Map::default()).collect();
  let mut conflicts = vec![];

  for state in 0..num_states as StateId {
    for (&sym, &dest) in collection.transitions(state) {
      let action = match sym {
        Symbol::Term(_) => Action::Shift(dest),
        Symbol::Nonterm(_) => Action::Goto(dest),
      };
      rows[state as usize].insert(sym, action);
    }
  }

  rows[0].insert(Symbol::Nonterm(grammar.prod(0).lhs), Action::Accept);

  for state in 0..num_states as StateId {
    let mut completed: Vec<usize> = collection.state_items(state)
      .filter(|(core, _)| core.dot_ix == grammar.prod(core.prod_ix).symbols.len())
      .map(|(core, _)| core.prod_ix)
      .collect();
    completed.sort_unstable();

    for prod_ix in completed {
      let lhs = grammar.prod(prod_ix).lhs;

      for terminal in oracle.follow(lhs).iter() {
        let col = Symbol::Term(terminal);

        if policy == ConflictPolicy::ReportConflicts {
          match rows[state as usize].get(&col) {
            Some(&Action::Shift(shift)) => {
              conflicts.push(ConflictError::ShiftReduce(ShiftReduceConflictError {
                state,
                terminal,
                shift,
                reduce: prod_ix,
              }));
            }
            Some(&Action::Reduce(reduce1)) if reduce1 != prod_ix => {
              conflicts.push(ConflictError::ReduceReduce(ReduceReduceConflictError {
                state,
                terminal,
                reduce1,
                reduce2: prod_ix,
              }));
            }
            _ => {}
          }
        }

        rows[state as usize].insert(col, Action::Reduce(prod_ix));
      }
    }
  }

  (ParseTable { rows }, conflicts)
}
