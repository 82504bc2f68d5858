//! Identifiers for files, tabs and panes.
//!
//! Ids are plain strings on the wire so documents written by other builds of the
//! workspace (or by hand) import verbatim. Fresh ids come from a counter rendered
//! in base-36 behind a one-letter prefix.

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(CompactString);

        impl $name {
            pub fn new(raw: impl Into<CompactString>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.0.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.0.as_str()
            }
        }
    };
}

define_id!(
    /// Id of a node in the file tree.
    FileId
);
define_id!(
    /// Id of an open tab.
    TabId
);
define_id!(
    /// Id of an editor pane.
    PaneId
);

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn base36(mut n: u64) -> CompactString {
    if n == 0 {
        return CompactString::const_new("0");
    }
    let mut digits = Vec::with_capacity(13);
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.iter().rev().collect()
}

/// Monotonic id source. Callers pass a predicate so ids already in use
/// (e.g. restored from a document) are skipped.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    prefix: char,
    next: u64,
}

impl IdAllocator {
    pub const fn new(prefix: char) -> Self {
        Self { prefix, next: 1 }
    }

    pub fn alloc(&mut self, mut taken: impl FnMut(&str) -> bool) -> CompactString {
        loop {
            let raw = format_compact!("{}{}", self.prefix, base36(self.next));
            self.next = self.next.saturating_add(1);
            if !taken(raw.as_str()) {
                return raw;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/ids.rs"]
mod tests;
