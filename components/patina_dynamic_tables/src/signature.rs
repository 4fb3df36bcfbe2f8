//! ACPI Constants.
//!
//! Defines common constants and table signatures used when building ACPI tables.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use core::mem;

use crate::acpi_table::AcpiTableHeader;

/// Packs a 4-character ASCII tag into its little-endian `u32` form.
pub const fn signature32(tag: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*tag)
}

/// Packs an 8-character ASCII tag into its little-endian `u64` form.
pub const fn signature64(tag: &[u8; 8]) -> u64 {
    u64::from_le_bytes(*tag)
}

// Helpers for handling ACPI signatures

pub const FACP: u32 = signature32(b"FACP");
pub const SSDT: u32 = signature32(b"SSDT");
pub const FADT: u32 = FACP; // For legacy ACPI reasons, the FADT has signature 'FACP'.

pub const ACPI_HEADER_LEN: usize = 36;
pub const ACPI_CHECKSUM_OFFSET: usize = mem::offset_of!(AcpiTableHeader, checksum);
pub const ACPI_LENGTH_OFFSET: usize = mem::offset_of!(AcpiTableHeader, length);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_are_little_endian() {
        assert_eq!(FACP, 0x50434146);
        assert_eq!(SSDT, 0x54445353);
        assert_eq!(signature32(b"DSDT"), 0x54445344);
        assert_eq!(&SSDT.to_le_bytes(), b"SSDT");
        assert_eq!(signature64(b"TESTPRMT"), 0x544D_5250_5453_4554);
    }

    #[test]
    fn header_offsets() {
        assert_eq!(mem::size_of::<AcpiTableHeader>(), ACPI_HEADER_LEN);
        assert_eq!(ACPI_LENGTH_OFFSET, 4);
        assert_eq!(ACPI_CHECKSUM_OFFSET, 9);
    }
}
