//! Tree configuration.
//!
//! `Settings` carries the three grammar bytes used to recognise parameter
//! segments in keys plus the rendering switches consumed by the `Display`
//! implementation.

use crate::{Error, Result};

/// Configuration for a [`Tree`](crate::Tree) or [`SyncTree`](crate::SyncTree).
///
/// # Examples
///
/// ```
/// use radix_params::{Settings, Tree};
///
/// let settings = Settings::default().escape_at(b':').delimiter(b'.');
/// let mut tree = Tree::with_settings(settings).unwrap();
/// tree.add("users.:id", 1).unwrap();
///
/// let (node, params) = tree.get("users.42");
/// assert_eq!(node.and_then(|n| n.value()), Some(&1));
/// assert_eq!(params["id"], "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub(crate) escape_at: u8,
    pub(crate) escape_end: u8,
    pub(crate) delimiter: u8,
    pub(crate) debug: bool,
    pub(crate) no_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            escape_at: b'@',
            escape_end: b'*',
            delimiter: b'/',
            debug: false,
            no_color: false,
        }
    }
}

impl Settings {
    /// Byte opening a named segment bounded by the next delimiter.
    pub fn escape_at(mut self, byte: u8) -> Self {
        self.escape_at = byte;
        self
    }

    /// Byte opening a catch-all segment spanning the rest of the key.
    pub fn escape_end(mut self, byte: u8) -> Self {
        self.escape_end = byte;
        self
    }

    /// Byte separating path segments.
    pub fn delimiter(mut self, byte: u8) -> Self {
        self.delimiter = byte;
        self
    }

    /// Annotate the rendered tree with node counts, leaf markers and values.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Render without ANSI colors.
    pub fn no_color(mut self, disabled: bool) -> Self {
        self.no_color = disabled;
        self
    }

    /// Checks that the grammar bytes are ASCII and pairwise distinct.
    ///
    /// Splitting keys on ASCII bytes keeps captured parameters valid UTF-8.
    pub fn validate(&self) -> Result<()> {
        let bytes = [self.escape_at, self.escape_end, self.delimiter];
        if let Some(b) = bytes.iter().find(|b| !b.is_ascii()) {
            return Err(Error::Settings(format!(
                "grammar byte 0x{:02x} is not ASCII",
                b
            )));
        }
        if bytes[0] == bytes[1] || bytes[0] == bytes[2] || bytes[1] == bytes[2] {
            return Err(Error::Settings(
                "escape and delimiter bytes must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.escape_at, b'@');
        assert_eq!(s.escape_end, b'*');
        assert_eq!(s.delimiter, b'/');
        assert!(!s.debug);
        assert!(!s.no_color);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_setters_chain() {
        let s = Settings::default()
            .escape_at(b':')
            .escape_end(b'#')
            .delimiter(b'.')
            .debug(true)
            .no_color(true);
        assert_eq!(s.escape_at, b':');
        assert_eq!(s.escape_end, b'#');
        assert_eq!(s.delimiter, b'.');
        assert!(s.debug);
        assert!(s.no_color);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let s = Settings::default().escape_end(b'@');
        assert!(matches!(s.validate(), Err(Error::Settings(_))));

        let s = Settings::default().delimiter(b'*');
        assert!(matches!(s.validate(), Err(Error::Settings(_))));
    }

    #[test]
    fn test_validate_rejects_non_ascii() {
        let s = Settings::default().delimiter(0xC3);
        assert!(matches!(s.validate(), Err(Error::Settings(_))));
    }
}
