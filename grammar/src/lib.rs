pub mod scanner;
mod grammar;

pub use self::grammar::*;

pub type Map<K, V> = indexmap::IndexMap<K, V, fnv::FnvBuildHasher>;
pub type Set<T> = indexmap::IndexSet<T, fnv::FnvBuildHasher>;
pub type HashMap<K, V> = fnv::FnvHashMap<K, V>;
pub type BiMap<L, R> = bimap::BiHashMap<L, R>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
  /// a rule references a name missing from both declared symbol sets.
  UndeclaredSymbol(String),
  /// a name is declared twice, or appears in both symbol sets.
  DuplicateSymbol(String),
  /// production 0 is not an augmenting rule of the shape `S' -> S`.
  MissingAugmentation,
}
