use std::fmt;
use crate::{BiMap, GrammarError};

/// Interned terminal. Every grammar carries the end-of-input terminal `$`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct TermId(u32);

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct NontermId(u32);

impl TermId {
  pub fn id(&self) -> u32 {
    self.0
  }

  pub fn index(&self) -> usize {
    self.0 as usize
  }

  pub fn from_index(index: usize) -> Self {
    TermId(index as u32)
  }
}

impl NontermId {
  pub fn id(&self) -> u32 {
    self.0
  }

  pub fn index(&self) -> usize {
    self.0 as usize
  }

  pub fn from_index(index: usize) -> Self {
    NontermId(index as u32)
  }
}

#[derive(Default)]
struct TermIdGen(u32);

impl TermIdGen {
  fn gen(&mut self) -> TermId {
    let i = self.0;
    self.0 += 1;
    TermId(i)
  }
}

#[derive(Default)]
struct NontermIdGen(u32);

impl NontermIdGen {
  fn gen(&mut self) -> NontermId {
    let i = self.0;
    self.0 += 1;
    NontermId(i)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
  Term(TermId),
  Nonterm(NontermId),
}

/// `lhs -> symbols`. The RHS may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
  pub lhs: NontermId,
  pub symbols: Vec<Symbol>,
}

impl Production {
  pub fn fmt(&self, grammar: &Grammar, f: &mut impl fmt::Write) -> fmt::Result {
    write!(f, "{} ->", grammar.nonterm_name(self.lhs))?;
    for &sym in &self.symbols {
      write!(f, " {}", grammar.symbol_name(sym))?;
    }
    Ok(())
  }

  pub fn to_string(&self, grammar: &Grammar) -> String {
    let mut buf = String::new();
    self.fmt(grammar, &mut buf).unwrap();
    buf
  }
}

/// Immutable grammar: interned symbol names, productions in caller order,
/// and a per-nonterminal index of its productions.
#[derive(Debug)]
pub struct Grammar {
  prods: Vec<Production>,
  nonterms: BiMap<NontermId, String>,
  terms: BiMap<TermId, String>,
  /// production indices of each nonterminal, in grammar order.
  nt_prods: Vec<Vec<usize>>,
  eof: TermId,
}

impl Grammar {
  /// Interns the declared names in declaration order, appends `$` to the
  /// terminal set unless already declared, and resolves every rule against
  /// the declared sets. `rules[0]` is expected to be the augmenting rule;
  /// that shape is checked by the collection builder, not here.
  pub fn build(
    nonterminals: &[&str],
    terminals: &[&str],
    rules: &[(&str, Vec<&str>)],
  ) -> Result<Grammar, GrammarError> {
    let mut nonterms = BiMap::new();
    let mut nt_id_gen = NontermIdGen::default();
    for &name in nonterminals {
      if nonterms.contains_right(name) {
        return Err(GrammarError::DuplicateSymbol(name.to_owned()));
      }
      nonterms.insert(nt_id_gen.gen(), name.to_owned());
    }

    let mut terms = BiMap::new();
    let mut term_id_gen = TermIdGen::default();
    for &name in terminals {
      if terms.contains_right(name) || nonterms.contains_right(name) {
        return Err(GrammarError::DuplicateSymbol(name.to_owned()));
      }
      terms.insert(term_id_gen.gen(), name.to_owned());
    }

    let eof = match terms.get_by_right("$") {
      Some(&id) => id,
      None => {
        if nonterms.contains_right("$") {
          return Err(GrammarError::DuplicateSymbol("$".to_owned()));
        }
        let id = term_id_gen.gen();
        terms.insert(id, "$".to_owned());
        id
      }
    };

    let mut prods = Vec::with_capacity(rules.len());
    let mut nt_prods = vec![vec![]; nonterms.len()];
    for (lhs_name, rhs_names) in rules {
      let &lhs = nonterms.get_by_right(*lhs_name)
        .ok_or_else(|| GrammarError::UndeclaredSymbol((*lhs_name).to_owned()))?;

      let mut symbols = Vec::with_capacity(rhs_names.len());
      for &sym_name in rhs_names {
        if let Some(&nt) = nonterms.get_by_right(sym_name) {
          symbols.push(Symbol::Nonterm(nt));
        } else if let Some(&term) = terms.get_by_right(sym_name) {
          symbols.push(Symbol::Term(term));
        } else {
          return Err(GrammarError::UndeclaredSymbol(sym_name.to_owned()));
        }
      }

      nt_prods[lhs.index()].push(prods.len());
      prods.push(Production { lhs, symbols });
    }

    Ok(Grammar {
      prods,
      nonterms,
      terms,
      nt_prods,
      eof,
    })
  }

  pub fn prods(&self) -> &[Production] {
    &self.prods
  }

  pub fn prod(&self, prod_ix: usize) -> &Production {
    &self.prods[prod_ix]
  }

  /// indices of `nt`'s productions, in grammar order.
  pub fn prods_of(&self, nt: NontermId) -> &[usize] {
    &self.nt_prods[nt.index()]
  }

  pub fn num_terms(&self) -> usize {
    self.terms.len()
  }

  pub fn num_nonterms(&self) -> usize {
    self.nonterms.len()
  }

  pub fn eof(&self) -> TermId {
    self.eof
  }

  /// RHS nonterminal of the augmenting production, if it has that shape.
  pub fn start_symbol(&self) -> Option<NontermId> {
    match self.prods.first()?.symbols.first()? {
      Symbol::Nonterm(nt) => Some(*nt),
      Symbol::Term(_) => None,
    }
  }

  pub fn term(&self, name: &str) -> Option<TermId> {
    self.terms.get_by_right(name).copied()
  }

  pub fn nonterm(&self, name: &str) -> Option<NontermId> {
    self.nonterms.get_by_right(name).copied()
  }

  pub fn term_name(&self, term: TermId) -> &str {
    self.terms.get_by_left(&term).map(|s| s.as_str()).unwrap()
  }

  pub fn nonterm_name(&self, nt: NontermId) -> &str {
    self.nonterms.get_by_left(&nt).map(|s| s.as_str()).unwrap()
  }

  pub fn symbol_name(&self, sym: Symbol) -> &str {
    match sym {
      Symbol::Term(term) => self.term_name(term),
      Symbol::Nonterm(nt) => self.nonterm_name(nt),
    }
  }

  pub fn terms(&self) -> impl Iterator<Item = (TermId, &str)> + '_ {
    (0..self.terms.len()).map(move |i| {
      let id = TermId(i as u32);
      (id, self.term_name(id))
    })
  }

  pub fn nonterms(&self) -> impl Iterator<Item = (NontermId, &str)> + '_ {
    (0..self.nonterms.len()).map(move |i| {
      let id = NontermId(i as u32);
      (id, self.nonterm_name(id))
    })
  }
}
