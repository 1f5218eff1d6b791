use super::dfa::Dfa;

/// Longest-match scanner over a character DFA.
pub struct Tokens<'dfa, 'input, V> {
  dfa: &'dfa Dfa<char, V>,
  input: &'input str,
  pos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'input, V> {
  pub value: V,
  pub text: &'input str,
  pub start: usize,
  pub end: usize,
}

/// A character at which no token can start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
  pub char: char,
  pub start: usize,
  pub end: usize,
}

impl<V> Dfa<char, V> {
  /// Tokenizes `input` by longest match, yielding an error item for every
  /// character that cannot start a token.
  pub fn scan<'dfa, 'input>(&'dfa self, input: &'input str) -> Tokens<'dfa, 'input, V> {
    Tokens::new(self, input)
  }
}

impl<'dfa, 'input, V> Tokens<'dfa, 'input, V> {
  pub(super) fn new(dfa: &'dfa Dfa<char, V>, input: &'input str) -> Self {
    Self { dfa, input, pos: 0 }
  }

  fn peek_char(&self) -> Option<char> {
    self.input[self.pos..].chars().next()
  }

  fn advance(&mut self) {
    self.pos += 1;
    while !self.input.is_char_boundary(self.pos) {
      self.pos += 1;
    }
  }
}

impl<'dfa, 'input, V> Iterator for Tokens<'dfa, 'input, V>
  where V: Copy,
{
  type Item = Result<Token<'input, V>, Error>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.pos == self.input.len() {
      return None;
    }

    let mut state = self.dfa.start();
    let start = self.pos;
    let mut end = start;
    let mut value = None;

    loop {
      let no_move = match self.peek_char() {
        Some(c) => {
          if let Some(next_state) = self.dfa.transition(state, c) {
            self.advance();
            state = next_state;
            false
          } else {
            true
          }
        }
        None => true,
      };

      if no_move {
        // rewind to the last accepting position.
        self.pos = end;

        return if end == start {
          match self.peek_char() {
            Some(char) => {
              let start = self.pos;
              self.advance();
              let end = self.pos;

              Some(Err(Error { char, start, end }))
            }
            None => None,
          }
        } else {
          value.map(|value| Ok(Token {
            value,
            text: &self.input[start..end],
            start,
            end,
          }))
        };
      }

      if let Some(&v) = self.dfa.result(state) {
        end = self.pos;
        value = Some(v);
      }
    }
  }
}
