//! Error types for SMBIOS string table operations
//!
//! This module defines the error type returned by [`StringTable`](crate::StringTable) operations
//! and its mapping onto UEFI status codes.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use r_efi::efi;

/// Broad classification of a [`StringTableError`].
///
/// Every error belongs to exactly one kind, and each kind corresponds to one UEFI status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The table is not in a usable state, or an argument was rejected.
    InvalidArgument,
    /// The table has no free slot, or the destination string area is too small.
    BufferTooSmall,
    /// Backing storage could not be allocated.
    OutOfResources,
}

/// SMBIOS string table errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringTableError {
    // Lifecycle errors
    /// Requested maximum string count is zero or exceeds [`MAX_STRING_ELEMENTS`](crate::MAX_STRING_ELEMENTS)
    InvalidMaxStringElements,
    /// The table is already initialized and must be freed before it is initialized again
    AlreadyInitialized,
    /// The table has not been initialized, or has been freed
    NotInitialized,

    // String validation errors
    /// String contains a null byte (terminators are added during publication)
    StringContainsNull,
    /// String contains a byte outside the 7-bit ASCII range
    StringNotAscii,

    // Capacity errors
    /// Every string slot of the table is in use
    StringTableFull,
    /// Destination string area cannot hold the encoded string set
    StringAreaTooSmall {
        /// Bytes needed to publish the string set
        required: usize,
        /// Bytes available in the destination
        available: usize,
    },

    // Resource allocation errors
    /// Failed to allocate memory for the string elements
    AllocationFailed,
}

impl StringTableError {
    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StringTableError::InvalidMaxStringElements
            | StringTableError::AlreadyInitialized
            | StringTableError::NotInitialized
            | StringTableError::StringContainsNull
            | StringTableError::StringNotAscii => ErrorKind::InvalidArgument,

            StringTableError::StringTableFull | StringTableError::StringAreaTooSmall { .. } => {
                ErrorKind::BufferTooSmall
            }

            StringTableError::AllocationFailed => ErrorKind::OutOfResources,
        }
    }
}

impl From<ErrorKind> for efi::Status {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument => efi::Status::INVALID_PARAMETER,
            ErrorKind::BufferTooSmall => efi::Status::BUFFER_TOO_SMALL,
            ErrorKind::OutOfResources => efi::Status::OUT_OF_RESOURCES,
        }
    }
}

impl From<StringTableError> for efi::Status {
    fn from(error: StringTableError) -> Self {
        error.kind().into()
    }
}
