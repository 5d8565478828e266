//! SMBIOS String Table
//!
//! A fixed-capacity accumulator for the strings of a single SMBIOS record. Record builders add
//! strings one at a time, embed the returned string reference in the record's structured fields,
//! and then publish the encoded string set directly after those fields.
//!
//! ## String Set Format
//!
//! ```text
//! [Header + Structured Data][String 1\0][String 2\0][String 3\0]\0
//!                            └────────── String Set ───────────┘
//! ```
//!
//! - **1-based references**: strings are numbered 1, 2, 3, ... in the order they were added
//! - **Reference 0 means "no string"**: see [`SMBIOS_STRING_REF_NONE`]
//! - **Null termination**: each string is followed by `\0` when published
//! - **Set terminator**: one additional `\0` follows the last string
//! - **Empty set**: a single `\0` byte
//!
//! ## Example
//!
//! ```
//! use patina_smbios_string_table::StringTable;
//!
//! let serial = "SN-0042";
//! let mut table = StringTable::new(3)?;
//! let manufacturer = table.add_string("Contoso")?;
//! let serial_number = table.add_string(serial)?;
//! let version = table.add_string_or_unknown(None)?;
//! assert_eq!((manufacturer, serial_number, version), (1, 2, 3));
//!
//! let mut string_area = [0u8; 32];
//! let written = table.publish_string_set(&mut string_area)?;
//! assert_eq!(written, table.string_set_size()?);
//! assert_eq!(&string_area[..written], b"Contoso\0SN-0042\0Unknown\0\0");
//! # Ok::<(), patina_smbios_string_table::StringTableError>(())
//! ```
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

extern crate alloc;

mod element;

pub use element::StringElement;

use alloc::{string::String, vec::Vec};
use core::ffi::CStr;

use crate::error::StringTableError;

/// String reference stored in an SMBIOS record's structured fields.
pub type SmbiosStringRef = u8;

/// String reference value meaning "no string".
pub const SMBIOS_STRING_REF_NONE: SmbiosStringRef = 0;

/// Largest number of strings a single table can hold.
///
/// One value of the one-byte reference type stays reserved, so the ceiling sits one below
/// `SmbiosStringRef::MAX`.
pub const MAX_STRING_ELEMENTS: usize = SmbiosStringRef::MAX as usize - 1;

const _: () = assert!(MAX_STRING_ELEMENTS > 0 && MAX_STRING_ELEMENTS <= SmbiosStringRef::MAX as usize);

/// String added by [`StringTable::add_string_or_unknown`] when no value is available.
pub const UNKNOWN_STRING: &str = "Unknown";

/// Fixed-capacity SMBIOS string table.
///
/// A table moves through three states:
///
/// - **Uninitialized** ([`StringTable::default`]): no storage, every operation other than
///   [`initialize`](StringTable::initialize) fails with [`StringTableError::NotInitialized`].
/// - **Initialized**: storage for `max_string_elements` strings is reserved and strings may be
///   added and published.
/// - **Freed** ([`free`](StringTable::free)): storage is released and the table behaves as
///   uninitialized until it is initialized again.
///
/// Strings added with [`add_string`](StringTable::add_string), [`add_bytes`](StringTable::add_bytes)
/// or [`add_cstr`](StringTable::add_cstr) are borrowed for `'a` rather than copied. Use
/// [`add_owned_string`](StringTable::add_owned_string) when the caller cannot keep the content
/// alive that long.
#[derive(Debug, Default)]
pub struct StringTable<'a> {
    /// Added strings, in reference order. `None` while uninitialized or freed.
    elements: Option<Vec<StringElement<'a>>>,
    /// Sum of all string lengths, excluding null terminators
    total_string_len: usize,
    max_string_elements: usize,
}

impl<'a> StringTable<'a> {
    /// Creates a table able to hold `max_string_elements` strings.
    ///
    /// # Errors
    ///
    /// Same as [`initialize`](StringTable::initialize).
    pub fn new(max_string_elements: usize) -> Result<Self, StringTableError> {
        let mut table = Self::default();
        table.initialize(max_string_elements)?;
        Ok(table)
    }

    /// Reserves storage for `max_string_elements` strings and resets the counters.
    ///
    /// # Errors
    ///
    /// - `StringTableError::AlreadyInitialized` if the table has not been freed since it was last
    ///   initialized. The table is left unchanged.
    /// - `StringTableError::InvalidMaxStringElements` if `max_string_elements` is zero or exceeds
    ///   [`MAX_STRING_ELEMENTS`].
    /// - `StringTableError::AllocationFailed` if storage cannot be reserved. The table stays
    ///   uninitialized.
    pub fn initialize(&mut self, max_string_elements: usize) -> Result<(), StringTableError> {
        if self.elements.is_some() {
            return Err(StringTableError::AlreadyInitialized);
        }

        if max_string_elements == 0 || max_string_elements > MAX_STRING_ELEMENTS {
            return Err(StringTableError::InvalidMaxStringElements);
        }

        let mut elements = Vec::new();
        elements.try_reserve_exact(max_string_elements).map_err(|_| StringTableError::AllocationFailed)?;

        self.elements = Some(elements);
        self.total_string_len = 0;
        self.max_string_elements = max_string_elements;
        Ok(())
    }

    /// Releases the string storage and zeroes the table.
    ///
    /// The table may be initialized again afterwards, and then behaves like a new table.
    ///
    /// # Errors
    ///
    /// Returns `StringTableError::NotInitialized` if the table was never initialized or has
    /// already been freed.
    pub fn free(&mut self) -> Result<(), StringTableError> {
        if self.elements.take().is_none() {
            return Err(StringTableError::NotInitialized);
        }

        self.total_string_len = 0;
        self.max_string_elements = 0;
        Ok(())
    }

    /// Adds a string and returns its 1-based reference.
    ///
    /// The string is borrowed, not copied. An empty string is accepted and is published as a
    /// lone null terminator.
    ///
    /// # Errors
    ///
    /// - `StringTableError::NotInitialized` if the table is not initialized.
    /// - `StringTableError::StringContainsNull` or `StringTableError::StringNotAscii` if the
    ///   string cannot be represented in an SMBIOS string set.
    /// - `StringTableError::StringTableFull` if every slot is in use.
    ///
    /// The table is unchanged on error.
    pub fn add_string(&mut self, string: &'a str) -> Result<SmbiosStringRef, StringTableError> {
        self.add_bytes(string.as_bytes())
    }

    /// Adds raw ASCII bytes (without a null terminator) and returns their 1-based reference.
    ///
    /// # Errors
    ///
    /// Same as [`add_string`](StringTable::add_string).
    pub fn add_bytes(&mut self, string: &'a [u8]) -> Result<SmbiosStringRef, StringTableError> {
        self.ensure_initialized()?;
        Self::validate_string(string)?;
        self.push(StringElement::borrowed(string))
    }

    /// Adds a null-terminated string and returns its 1-based reference.
    ///
    /// The terminator is not stored; it is written again when the string set is published.
    ///
    /// # Errors
    ///
    /// Same as [`add_string`](StringTable::add_string).
    pub fn add_cstr(&mut self, string: &'a CStr) -> Result<SmbiosStringRef, StringTableError> {
        self.add_bytes(string.to_bytes())
    }

    /// Takes ownership of `string` and returns its 1-based reference.
    ///
    /// # Errors
    ///
    /// Same as [`add_string`](StringTable::add_string).
    pub fn add_owned_string(&mut self, string: String) -> Result<SmbiosStringRef, StringTableError> {
        self.ensure_initialized()?;
        Self::validate_string(string.as_bytes())?;
        self.push(StringElement::owned(string.into_bytes()))
    }

    /// Adds `string`, or [`UNKNOWN_STRING`] when `string` is `None` or empty.
    ///
    /// Failures are logged and returned to the caller.
    ///
    /// # Errors
    ///
    /// Same as [`add_string`](StringTable::add_string).
    pub fn add_string_or_unknown(&mut self, string: Option<&'a str>) -> Result<SmbiosStringRef, StringTableError> {
        let string = match string {
            Some(s) if !s.is_empty() => s,
            _ => {
                log::debug!("SMBIOS string not provided, using \"{}\"", UNKNOWN_STRING);
                UNKNOWN_STRING
            }
        };

        self.add_string(string).inspect_err(|e| {
            log::error!("Failed to add SMBIOS string \"{}\": {:?}", string, e);
        })
    }

    /// Returns the number of bytes [`publish_string_set`](StringTable::publish_string_set) writes
    /// for the current contents.
    ///
    /// Each string contributes its length plus one terminator, and the set contributes one final
    /// terminator. A table without strings needs exactly 1 byte.
    ///
    /// # Errors
    ///
    /// Returns `StringTableError::NotInitialized` if the table is not initialized.
    pub fn string_set_size(&self) -> Result<usize, StringTableError> {
        let elements = self.elements()?;
        Ok(self.total_string_len + elements.len() + 1)
    }

    /// Writes the encoded string set to the start of `string_area`.
    ///
    /// Returns the number of bytes written, which always equals
    /// [`string_set_size`](StringTable::string_set_size). Bytes of `string_area` past that point
    /// are not touched, and the table itself is not modified, so the same contents can be
    /// published any number of times.
    ///
    /// # Errors
    ///
    /// - `StringTableError::NotInitialized` if the table is not initialized.
    /// - `StringTableError::StringAreaTooSmall` if `string_area` is shorter than the string set.
    ///   Nothing is written.
    pub fn publish_string_set(&self, string_area: &mut [u8]) -> Result<usize, StringTableError> {
        let required = self.string_set_size()?;
        if string_area.len() < required {
            return Err(StringTableError::StringAreaTooSmall { required, available: string_area.len() });
        }

        let mut offset = 0;
        for element in self.elements()? {
            let end = offset + element.len();
            string_area[offset..end].copy_from_slice(element.as_bytes());
            string_area[end] = 0;
            offset += element.encoded_len();
        }

        // Set terminator
        string_area[offset] = 0;
        offset += 1;

        debug_assert_eq!(offset, required, "published string set size must match string_set_size()");
        Ok(offset)
    }

    /// Publishes the string set into a newly allocated buffer of exactly
    /// [`string_set_size`](StringTable::string_set_size) bytes.
    ///
    /// # Errors
    ///
    /// - `StringTableError::NotInitialized` if the table is not initialized.
    /// - `StringTableError::AllocationFailed` if the buffer cannot be allocated.
    pub fn to_string_set(&self) -> Result<Vec<u8>, StringTableError> {
        let size = self.string_set_size()?;

        let mut string_set = Vec::new();
        string_set.try_reserve_exact(size).map_err(|_| StringTableError::AllocationFailed)?;
        string_set.resize(size, 0);

        self.publish_string_set(&mut string_set)?;
        Ok(string_set)
    }

    /// Returns true between [`initialize`](StringTable::initialize) and [`free`](StringTable::free).
    pub fn is_initialized(&self) -> bool {
        self.elements.is_some()
    }

    /// Number of strings in the table.
    pub fn len(&self) -> usize {
        self.elements.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if no strings have been added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of strings, or 0 if the table is not initialized.
    pub fn max_string_elements(&self) -> usize {
        self.max_string_elements
    }

    /// Total length of all strings, not counting null terminators.
    pub fn total_string_len(&self) -> usize {
        self.total_string_len
    }

    /// Looks up a string by its 1-based reference.
    ///
    /// Returns `None` for [`SMBIOS_STRING_REF_NONE`] and for references that were never handed out.
    pub fn get(&self, string_ref: SmbiosStringRef) -> Option<&StringElement<'a>> {
        let index = usize::from(string_ref).checked_sub(1)?;
        self.elements.as_ref()?.get(index)
    }

    /// Iterates over the strings in reference order.
    pub fn iter(&self) -> impl Iterator<Item = &StringElement<'a>> {
        self.elements.iter().flatten()
    }

    /// Ensures a string can be stored in an SMBIOS string set.
    ///
    /// Null bytes are rejected since they would end the string early and shift every later
    /// reference. Only 7-bit ASCII is accepted.
    fn validate_string(string: &[u8]) -> Result<(), StringTableError> {
        if string.contains(&0) {
            return Err(StringTableError::StringContainsNull);
        }
        if !string.is_ascii() {
            return Err(StringTableError::StringNotAscii);
        }
        Ok(())
    }

    fn elements(&self) -> Result<&[StringElement<'a>], StringTableError> {
        self.elements.as_deref().ok_or(StringTableError::NotInitialized)
    }

    fn ensure_initialized(&self) -> Result<(), StringTableError> {
        self.elements().map(|_| ())
    }

    /// Appends a validated element. Nothing is modified on error.
    fn push(&mut self, element: StringElement<'a>) -> Result<SmbiosStringRef, StringTableError> {
        let elements = self.elements.as_mut().ok_or(StringTableError::NotInitialized)?;
        if elements.len() >= self.max_string_elements {
            return Err(StringTableError::StringTableFull);
        }

        // Cannot fail while max_string_elements <= MAX_STRING_ELEMENTS.
        let string_ref =
            SmbiosStringRef::try_from(elements.len() + 1).map_err(|_| StringTableError::StringTableFull)?;

        self.total_string_len += element.len();
        elements.push(element);
        Ok(string_ref)
    }
}
