//! SMBIOS String Table
//!
//! Builds the string set that follows the structured data of an SMBIOS record.
//!
//! SMBIOS records refer to their text through 1-based string references stored in the structured
//! fields. A record builder creates a [`StringTable`] sized for the record's string fields, adds
//! each string to obtain its reference, and finally publishes the encoded string set right after
//! the structured data:
//!
//! ```
//! use patina_smbios_string_table::{StringTable, StringTableError};
//!
//! fn build_string_set(vendor: Option<&str>, version: Option<&str>) -> Result<(u8, u8, Vec<u8>), StringTableError> {
//!     let mut table = StringTable::new(2)?;
//!     let vendor = table.add_string_or_unknown(vendor)?;
//!     let version = table.add_string_or_unknown(version)?;
//!     Ok((vendor, version, table.to_string_set()?))
//! }
//!
//! let (vendor, version, string_set) = build_string_set(Some("Patina"), None)?;
//! assert_eq!((vendor, version), (1, 2));
//! assert_eq!(string_set, b"Patina\0Unknown\0\0");
//! # Ok::<(), StringTableError>(())
//! ```
//!
//! Errors convert into UEFI status codes, so `efiapi` callers can return them directly:
//!
//! ```
//! use patina_smbios_string_table::{StringTable, StringTableError};
//! use r_efi::efi;
//!
//! let mut table = StringTable::new(1).unwrap();
//! table.add_string("only").unwrap();
//! let status: efi::Status = table.add_string("one too many").unwrap_err().into();
//! assert_eq!(status, efi::Status::BUFFER_TOO_SMALL);
//! ```
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

#![no_std]

pub mod error;
pub mod string_table;

pub use error::{ErrorKind, StringTableError};
pub use string_table::{
    MAX_STRING_ELEMENTS, SMBIOS_STRING_REF_NONE, SmbiosStringRef, StringElement, StringTable, UNKNOWN_STRING,
};
