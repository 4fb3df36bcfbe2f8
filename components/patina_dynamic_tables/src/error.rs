//! Error codes for the patina_dynamic_tables crate
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
use core::fmt;

use r_efi::efi;

/// The error type for configuration queries and table header assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicTablesError {
    /// A parameter was malformed: a bad object id, a table length that cannot hold a header,
    /// or a generator revision outside of the generator's supported range.
    InvalidParameter,
    /// The configuration manager does not provide the requested object.
    NotFound,
    /// The configuration manager returned an object smaller than the expected record size.
    BadBufferSize,
    /// The configuration manager does not support the requested namespace or object.
    Unsupported,
}

impl fmt::Display for DynamicTablesError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DynamicTablesError::InvalidParameter => write!(fmt, "Invalid parameter"),
            DynamicTablesError::NotFound => write!(fmt, "Configuration manager object not found"),
            DynamicTablesError::BadBufferSize => {
                write!(fmt, "Configuration manager object is smaller than the expected record size")
            }
            DynamicTablesError::Unsupported => write!(fmt, "Configuration manager object is not supported"),
        }
    }
}

impl From<DynamicTablesError> for efi::Status {
    fn from(err: DynamicTablesError) -> Self {
        match err {
            DynamicTablesError::InvalidParameter => efi::Status::INVALID_PARAMETER,
            DynamicTablesError::NotFound => efi::Status::NOT_FOUND,
            DynamicTablesError::BadBufferSize => efi::Status::BAD_BUFFER_SIZE,
            DynamicTablesError::Unsupported => efi::Status::UNSUPPORTED,
        }
    }
}

/// A specialized result type for the patina_dynamic_tables crate.
pub type Result<T> = core::result::Result<T, DynamicTablesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_efi_status() {
        assert_eq!(efi::Status::from(DynamicTablesError::InvalidParameter), efi::Status::INVALID_PARAMETER);
        assert_eq!(efi::Status::from(DynamicTablesError::NotFound), efi::Status::NOT_FOUND);
        assert_eq!(efi::Status::from(DynamicTablesError::BadBufferSize), efi::Status::BAD_BUFFER_SIZE);
        assert_eq!(efi::Status::from(DynamicTablesError::Unsupported), efi::Status::UNSUPPORTED);
    }

    #[test]
    fn bad_buffer_size_display() {
        assert_eq!(
            format!("{}", DynamicTablesError::BadBufferSize),
            "Configuration manager object is smaller than the expected record size"
        );
    }
}
