//! Key grammar: literal text interleaved with parameter segments.
//!
//! A parameter segment is an escape byte followed by a name. An `escape_at`
//! segment ends at the next delimiter and captures one path segment of a
//! looked-up key; an `escape_end` segment must be the last one of a key and
//! captures everything that remains.

use crate::settings::Settings;
use crate::util::find_or_end;
use crate::{Error, Result};

/// A `(name, captured)` pair borrowed from an edge label and the looked-up key.
pub(crate) type Capture<'t, 'k> = (&'t [u8], &'k [u8]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Grammar {
    at: u8,
    end: u8,
    delim: u8,
}

impl Grammar {
    pub fn new(settings: &Settings) -> Self {
        Grammar {
            at: settings.escape_at,
            end: settings.escape_end,
            delim: settings.delimiter,
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delim
    }

    pub fn is_escape(&self, byte: u8) -> bool {
        byte == self.at || byte == self.end
    }

    /// Whether the label opens with a parameter segment.
    pub fn is_param(&self, label: &[u8]) -> bool {
        label.first().map_or(false, |&b| self.is_escape(b))
    }

    /// Checks escape usage of a raw key before it touches the tree.
    ///
    /// Two escapes may not share a segment and a catch-all segment may not be
    /// followed by a delimiter.
    pub fn validate(&self, key: &[u8]) -> Result<()> {
        let mut in_at = false;
        let mut in_end = false;

        for &b in key {
            if self.is_escape(b) {
                if in_at || in_end {
                    return Err(Error::Invalid);
                }
                if b == self.at {
                    in_at = true;
                } else {
                    in_end = true;
                }
            } else if b == self.delim {
                if in_end {
                    return Err(Error::Invalid);
                }
                in_at = false;
            }
        }

        Ok(())
    }

    /// Whether `prefix` stops in the middle of a parameter segment, i.e. an
    /// escape byte appears after its last delimiter.
    pub fn is_open(&self, prefix: &[u8]) -> bool {
        for &b in prefix.iter().rev() {
            if b == self.delim {
                return false;
            }
            if self.is_escape(b) {
                return true;
            }
        }
        false
    }

    /// Matches one edge label against the front of `key`.
    ///
    /// Returns how many key bytes the label consumed. Named captures are
    /// appended to `captures`; on a mismatch they are rolled back.
    pub fn match_label<'t, 'k>(
        &self,
        label: &'t [u8],
        key: &'k [u8],
        captures: &mut Vec<Capture<'t, 'k>>,
    ) -> Option<usize> {
        let mark = captures.len();
        let mut label = label;
        let mut rest = key;

        loop {
            let literal = label
                .iter()
                .position(|&b| self.is_escape(b))
                .unwrap_or(label.len());

            if !rest.starts_with(&label[..literal]) {
                captures.truncate(mark);
                return None;
            }
            rest = &rest[literal..];

            if literal == label.len() {
                return Some(key.len() - rest.len());
            }

            let catch_all = label[literal] == self.end;
            let segment = &label[literal + 1..];
            let name_len = find_or_end(segment, self.delim);
            let name = &segment[..name_len];
            label = &segment[name_len..];

            let taken = if catch_all {
                rest.len()
            } else {
                find_or_end(rest, self.delim)
            };
            if taken == 0 {
                captures.truncate(mark);
                return None;
            }

            if !name.is_empty() {
                captures.push((name, &rest[..taken]));
            }
            rest = &rest[taken..];
        }
    }
}
