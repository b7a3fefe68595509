/*!

Instance tokens name the property under which a weak map shim stores its associations on key objects. A token is
built from three parts:

 1. the time of construction in milliseconds, in base 36,
 2. a process-wide counter, which alone makes tokens within one process distinct,
 3. 64 random bits, so that tokens from different processes (or a counter that wraps) are unlikely to meet.

Nothing structurally prevents two tokens from colliding across processes; the random component only makes it
improbable. Tokens are interned.

*/

use std::{
  fmt::{Display, Formatter},
  sync::atomic::{AtomicU64, Ordering},
  time::{SystemTime, UNIX_EPOCH}
};

use crate::abstractions::IString;

pub const TOKEN_PREFIX: &str = "__weak_map";

static TOKEN_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct InstanceToken(IString);

impl InstanceToken {
  pub fn generate() -> InstanceToken {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    let count  = TOKEN_COUNTER.fetch_add(1, Ordering::Relaxed);
    let random = rand::random::<u64>();

    InstanceToken(IString::from(format!(
      "{}:{}:{}:{:016x}",
      TOKEN_PREFIX,
      to_base36(millis),
      count,
      random
    )))
  }

  #[inline(always)]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for InstanceToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

fn to_base36(mut n: u128) -> String {
  const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

  if n == 0 {
    return "0".to_string();
  }
  let mut digits = Vec::new();
  while n > 0 {
    digits.push(DIGITS[(n % 36) as usize]);
    n /= 36;
  }
  digits.reverse();
  // Every byte came from `DIGITS`.
  String::from_utf8(digits).unwrap_or_default()
}


#[cfg(test)]
mod tests {
  use std::collections::HashSet;
  use super::*;

  #[test]
  fn base36() {
    assert_eq!(to_base36(0), "0");
    assert_eq!(to_base36(35), "z");
    assert_eq!(to_base36(36), "10");
    assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
  }

  #[test]
  fn tokens_are_distinct_and_prefixed() {
    let tokens = (0..1000).map(|_| InstanceToken::generate()).collect::<HashSet<_>>();
    assert_eq!(tokens.len(), 1000);
    assert!(tokens.iter().all(|token| token.as_str().starts_with(TOKEN_PREFIX)));
  }

  #[test]
  fn token_has_four_parts() {
    let token = InstanceToken::generate();
    let parts = token.as_str().split(':').collect::<Vec<_>>();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[3].len(), 16);
  }
}
