use std::collections::VecDeque;
use grammar::{Grammar, Symbol};
use crate::first::FirstFollowOracle;
use crate::store::{Item, ItemCore, ItemStore, StateId};
use crate::{HashMap, Map};

/// Runs the closure/goto fixpoint. State 0 is the closure of the augmenting
/// item; discovered states enter a FIFO queue, and a structural key hit
/// adds an edge without requeueing the target.
pub(super) fn gen_states<F>(grammar: &Grammar, oracle: &F, store: &mut ItemStore)
  where F: FirstFollowOracle,
{
  let mut start_items = vec![Item {
    core: ItemCore { prod_ix: 0, dot_ix: 0 },
    lookaheads: oracle.first(&grammar.prod(0).symbols[..1]),
  }];
  close_items(grammar, oracle, &mut start_items);
  let (start_state, _) = intern_items(store, start_items);

  let mut queue = VecDeque::new();
  queue.push_back(start_state);

  while let Some(state_ix) = queue.pop_front() {
    for (sym, mut kernel) in goto_kernels(grammar, store, state_ix) {
      close_items(grammar, oracle, &mut kernel);

      let (next_state, is_new) = intern_items(store, kernel);
      if is_new {
        queue.push_back(next_state);
      }
      store.state_mut(state_ix).transitions.insert(sym, next_state);
    }
  }
}

/// Kernels reachable from `state`, one per symbol appearing after a dot,
/// keyed in first-occurrence order over the state's items.
fn goto_kernels(grammar: &Grammar, store: &ItemStore, state: StateId) -> Map<Symbol, Vec<Item>> {
  let mut kernels = Map::<Symbol, Vec<Item>>::default();

  for &item_id in &store.state(state).items {
    let item = store.item(item_id);
    let prod = grammar.prod(item.core.prod_ix);
    if item.core.dot_ix == prod.symbols.len() {
      continue;
    }

    kernels.entry(prod.symbols[item.core.dot_ix])
      .or_default()
      .push(Item {
        core: ItemCore {
          prod_ix: item.core.prod_ix,
          dot_ix: item.core.dot_ix + 1,
        },
        lookaheads: item.lookaheads.clone(),
      });
  }

  kernels
}

/// Closes `items` in place. Each nonterminal's derived items form one block;
/// when a block's lookaheads grow, scanning resumes from the block so
/// derivations depending on it observe the union.
fn close_items<F>(grammar: &Grammar, oracle: &F, items: &mut Vec<Item>)
  where F: FirstFollowOracle,
{
  // nonterminal -> index of the first dot-0 item derived for it
  let mut nt_starts = HashMap::default();

  for (i, item) in items.iter().enumerate() {
    if item.core.dot_ix == 0 {
      let nt = grammar.prod(item.core.prod_ix).lhs;
      if !nt_starts.contains_key(&nt) {
        nt_starts.insert(nt, i);
      }
    }
  }

  let mut i = 0;
  while i < items.len() {
    let core = items[i].core;
    let prod = grammar.prod(core.prod_ix);
    if core.dot_ix == prod.symbols.len() {
      i += 1;
      continue;
    }

    let nt = match prod.symbols[core.dot_ix] {
      Symbol::Nonterm(nt) => nt,
      Symbol::Term(_) => {
        i += 1;
        continue;
      }
    };

    let beta = &prod.symbols[core.dot_ix + 1..];
    let lookaheads = if beta.is_empty() {
      items[i].lookaheads.clone()
    } else {
      oracle.first(beta)
    };

    if let Some(&nt_start) = nt_starts.get(&nt) {
      let mut changed = false;
      for j in nt_start..nt_start + grammar.prods_of(nt).len() {
        changed |= items[j].lookaheads.union_with(&lookaheads);
      }

      if changed {
        if i > nt_start {
          i = nt_start;
        }
      } else {
        i += 1;
      }
    } else {
      nt_starts.insert(nt, items.len());

      for &prod_ix in grammar.prods_of(nt) {
        items.push(Item {
          core: ItemCore { prod_ix, dot_ix: 0 },
          lookaheads: lookaheads.clone(),
        });
      }

      i += 1;
    }
  }
}

fn intern_items(store: &mut ItemStore, items: Vec<Item>) -> (StateId, bool) {
  let mut key: Vec<ItemCore> = items.iter().map(|item| item.core).collect();
  key.sort();

  store.intern_state(key, items)
}
