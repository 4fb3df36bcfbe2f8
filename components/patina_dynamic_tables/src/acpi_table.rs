//! ACPI Table Definitions.
//!
//! Defines the standard ACPI description header and the checksum rules shared by every
//! table built on top of it.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, IntoBytes};
use zerocopy_derive::*;

use crate::error::{DynamicTablesError, Result};
use crate::signature::ACPI_HEADER_LEN;

/// Represents a standard ACPI header.
/// Equivalent to EFI_ACPI_DESCRIPTION_HEADER.
///
/// Multi-byte fields are stored little-endian regardless of the host.
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct AcpiTableHeader {
    pub signature: U32,
    pub length: U32,
    pub revision: u8,
    pub checksum: u8,
    pub oem_id: [u8; 6],
    pub oem_table_id: [u8; 8],
    pub oem_revision: U32,
    pub creator_id: U32,
    pub creator_revision: U32,
}

const _: () = assert!(core::mem::size_of::<AcpiTableHeader>() == ACPI_HEADER_LEN);

impl AcpiTableHeader {
    /// Reads a header from the start of `table`.
    ///
    /// Returns `None` if `table` is shorter than a header.
    pub fn read_from_table(table: &[u8]) -> Option<Self> {
        Self::read_from_prefix(table).ok().map(|(header, _)| header)
    }

    /// Writes the header over the first [`ACPI_HEADER_LEN`] bytes of `table`.
    pub fn write_to_table(&self, table: &mut [u8]) -> Result<()> {
        self.write_to_prefix(table).map_err(|_| DynamicTablesError::InvalidParameter)
    }

    /// Serialize `self` in ACPI's canonical layout.
    pub fn hdr_to_bytes(&self) -> [u8; ACPI_HEADER_LEN] {
        let mut buf = [0u8; ACPI_HEADER_LEN];
        buf.copy_from_slice(self.as_bytes());
        buf
    }
}

/// Returns the 8-bit sum of `bytes`.
pub fn byte_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Returns true when every byte of `table` sums to zero modulo 256.
pub fn is_checksum_valid(table: &[u8]) -> bool {
    byte_sum(table) == 0
}

/// Updates the checksum byte at `offset` in `table`.
/// According to the ACPI spec 2.0+, all bytes of a table must sum to zero modulo 256.
///
/// The byte at `offset` is cleared before summing, so a stale checksum does not leak into the result.
pub fn update_checksum(table: &mut [u8], offset: usize) -> Result<()> {
    if offset >= table.len() {
        return Err(DynamicTablesError::InvalidParameter);
    }

    table[offset] = 0;
    let sum = byte_sum(table);
    table[offset] = 0u8.wrapping_sub(sum);
    Ok(())
}
