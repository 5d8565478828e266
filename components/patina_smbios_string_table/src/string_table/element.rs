//! String table element
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

extern crate alloc;

use alloc::{borrow::Cow, vec::Vec};

/// One string accepted by a [`StringTable`](crate::StringTable).
///
/// The content excludes the null terminator, which is only written when the string set is
/// published. Content added through the borrowing entry points is not copied; the `'a` lifetime
/// ties it to the caller's buffer until the table is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringElement<'a> {
    string: Cow<'a, [u8]>,
}

impl<'a> StringElement<'a> {
    pub(crate) fn borrowed(string: &'a [u8]) -> Self {
        Self { string: Cow::Borrowed(string) }
    }

    pub(crate) fn owned(string: Vec<u8>) -> Self {
        Self { string: Cow::Owned(string) }
    }

    /// Length of the string in bytes, not counting the null terminator.
    pub fn len(&self) -> usize {
        self.string.len()
    }

    /// Returns true if the string has no content.
    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// Raw string bytes, without the null terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.string
    }

    /// The string content. Elements only ever hold ASCII.
    pub fn as_str(&self) -> &str {
        // Content is validated as ASCII before an element is created.
        core::str::from_utf8(&self.string).unwrap_or_default()
    }

    /// Returns true if the element references caller memory rather than an owned copy.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.string, Cow::Borrowed(_))
    }

    /// Bytes this element occupies in a published string set.
    pub(crate) fn encoded_len(&self) -> usize {
        self.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::vec;

    #[test]
    fn test_borrowed_element() {
        let source = "Patina";
        let element = StringElement::borrowed(source.as_bytes());

        assert_eq!(element.len(), 6);
        assert_eq!(element.encoded_len(), 7);
        assert_eq!(element.as_bytes(), b"Patina");
        assert_eq!(element.as_str(), "Patina");
        assert!(element.is_borrowed());
        assert!(!element.is_empty());
        // The element points at the caller's bytes, not a copy.
        assert_eq!(element.as_bytes().as_ptr(), source.as_ptr());
    }

    #[test]
    fn test_owned_element() {
        let element = StringElement::owned(vec![b'v', b'1']);

        assert_eq!(element.len(), 2);
        assert_eq!(element.as_str(), "v1");
        assert!(!element.is_borrowed());
    }

    #[test]
    fn test_empty_element() {
        let element = StringElement::borrowed(b"");

        assert!(element.is_empty());
        assert_eq!(element.len(), 0);
        assert_eq!(element.encoded_len(), 1);
    }
}
