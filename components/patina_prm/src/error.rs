//! Error codes for the patina_prm crate
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
use core::fmt;

use patina_dynamic_tables::error::DynamicTablesError;
use r_efi::efi;

/// The error type for building a PRM ACPI table.
///
/// Every variant other than `Table` is a layout violation that stops the table from being finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrmError {
    /// No PRM modules were added to the table.
    EmptyTable,
    /// A module declares a different number of handlers than it carries.
    HandlerCountMismatch {
        /// GUID of the offending module.
        module: efi::Guid,
        /// Handler count the module declared.
        declared: u32,
        /// Handler entries actually present.
        present: usize,
    },
    /// Two modules share a GUID.
    DuplicateModuleGuid(efi::Guid),
    /// Two handlers in the table share a GUID.
    DuplicateHandlerGuid(efi::Guid),
    /// A module entry, including its handler array, does not fit its 16-bit length field.
    StructureTooLarge {
        /// GUID of the offending module.
        module: efi::Guid,
        /// Length the module entry would need.
        length: usize,
    },
    /// An offset does not point strictly inside the structure that declares it.
    OffsetOutOfRange {
        /// Offset from the start of the declaring structure.
        offset: usize,
        /// Declared length of that structure.
        length: usize,
    },
    /// The table does not fit its 32-bit length field.
    TableTooLarge,
    /// The caller's buffer cannot hold the table.
    BufferTooSmall {
        /// Bytes the table needs.
        required: usize,
        /// Bytes the caller provided.
        actual: usize,
    },
    /// A data buffer payload does not fit its 32-bit length field.
    DataBufferTooLarge,
    /// Header assembly failed.
    Table(DynamicTablesError),
}

impl fmt::Display for PrmError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrmError::EmptyTable => write!(fmt, "No PRM modules were added to the table"),
            PrmError::HandlerCountMismatch { module, declared, present } => {
                write!(fmt, "PRM module {module:?} declares {declared} handlers but carries {present}")
            }
            PrmError::DuplicateModuleGuid(guid) => write!(fmt, "Duplicate PRM module GUID {guid:?}"),
            PrmError::DuplicateHandlerGuid(guid) => write!(fmt, "Duplicate PRM handler GUID {guid:?}"),
            PrmError::StructureTooLarge { module, length } => {
                write!(fmt, "PRM module {module:?} info structure is too large ({length} bytes)")
            }
            PrmError::OffsetOutOfRange { offset, length } => {
                write!(fmt, "Offset {offset} is outside of a structure of length {length}")
            }
            PrmError::TableTooLarge => write!(fmt, "PRM table length does not fit in 32 bits"),
            PrmError::BufferTooSmall { required, actual } => {
                write!(fmt, "Buffer is too small for the PRM table (required {required}, actual {actual})")
            }
            PrmError::DataBufferTooLarge => write!(fmt, "PRM data buffer length does not fit in 32 bits"),
            PrmError::Table(err) => write!(fmt, "Failed to add the PRM table header: {err}"),
        }
    }
}

impl From<DynamicTablesError> for PrmError {
    fn from(err: DynamicTablesError) -> Self {
        PrmError::Table(err)
    }
}

impl From<PrmError> for efi::Status {
    fn from(err: PrmError) -> Self {
        match err {
            PrmError::EmptyTable => efi::Status::NOT_FOUND,
            PrmError::BufferTooSmall { .. } => efi::Status::BUFFER_TOO_SMALL,
            PrmError::TableTooLarge | PrmError::DataBufferTooLarge => efi::Status::BAD_BUFFER_SIZE,
            PrmError::Table(err) => err.into(),
            PrmError::HandlerCountMismatch { .. }
            | PrmError::DuplicateModuleGuid(_)
            | PrmError::DuplicateHandlerGuid(_)
            | PrmError::StructureTooLarge { .. }
            | PrmError::OffsetOutOfRange { .. } => efi::Status::INVALID_PARAMETER,
        }
    }
}

/// A specialized result type for the patina_prm crate.
pub type Result<T> = core::result::Result<T, PrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    const GUID: efi::Guid =
        efi::Guid::from_fields(0x1, 0x2, 0x3, 0x4, 0x5, &[0x6, 0x7, 0x8, 0x9, 0xA, 0xB]);

    #[test]
    fn layout_violations_are_invalid_parameter() {
        assert_eq!(efi::Status::from(PrmError::DuplicateHandlerGuid(GUID)), efi::Status::INVALID_PARAMETER);
        assert_eq!(
            efi::Status::from(PrmError::HandlerCountMismatch { module: GUID, declared: 2, present: 1 }),
            efi::Status::INVALID_PARAMETER
        );
        assert_eq!(
            efi::Status::from(PrmError::OffsetOutOfRange { offset: 48, length: 48 }),
            efi::Status::INVALID_PARAMETER
        );
    }

    #[test]
    fn header_errors_keep_their_status() {
        assert_eq!(efi::Status::from(PrmError::from(DynamicTablesError::NotFound)), efi::Status::NOT_FOUND);
        assert_eq!(efi::Status::from(PrmError::from(DynamicTablesError::BadBufferSize)), efi::Status::BAD_BUFFER_SIZE);
    }

    #[test]
    fn buffer_too_small_display() {
        assert_eq!(
            format!("{}", PrmError::BufferTooSmall { required: 132, actual: 44 }),
            "Buffer is too small for the PRM table (required 132, actual 44)"
        );
    }
}
