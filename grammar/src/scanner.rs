//! Scanner construction: assemble an NFA with epsilon transitions, convert
//! it to a DFA by subset construction, and tokenize by longest match.

pub mod nfa;
pub mod nfa_builder;
pub mod dfa;
pub mod dfa_builder;
mod powerset;
pub mod tokens;

pub use nfa::Nfa;
pub use nfa_builder::NfaBuilder;
pub use dfa::Dfa;
pub use tokens::{Token, Tokens};
