//! Builds LR parsing tables from augmented context-free grammars.
//!
//! The pipeline: intern a [`Grammar`], compute its FIRST/FOLLOW/NULLABLE
//! sets, run the closure/goto worklist into a [`CanonicalCollection`], then
//! assemble the [`ParseTable`] in two passes (shifts and gotos from the
//! transition relation, FOLLOW-driven reduces on top). [`build_tables`] runs
//! the whole pipeline.

pub use grammar::{
  Grammar, GrammarError, NontermId, Production, Symbol, TermId,
};
pub use lr::report;
pub use lr::{
  build_collection, gen_table, Action, CanonicalCollection, ConflictError,
  ConflictPolicy, ConstructionWarning, FirstFollow, FirstFollowOracle,
  ItemCore, ParseTable, ReduceReduceConflictError, ShiftReduceConflictError,
  StateId, TermSet,
};

/// Everything one construction run produces.
#[derive(Debug)]
pub struct Tables {
  pub table: ParseTable,
  pub collection: CanonicalCollection,
  pub conflicts: Vec<ConflictError>,
  pub warnings: Vec<ConstructionWarning>,
}

pub fn build_tables(
  grammar: &Grammar,
  policy: ConflictPolicy,
) -> Result<Tables, GrammarError> {
  let ffn = FirstFollow::compute(grammar);
  let collection = build_collection(grammar, &ffn)?;
  let warnings = collection.check_reachability();
  let (table, conflicts) = gen_table(grammar, &ffn, &collection, policy);

  Ok(Tables {
    table,
    collection,
    conflicts,
    warnings,
  })
}
