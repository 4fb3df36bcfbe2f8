//! Configuration Manager standard objects.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
use zerocopy::byteorder::little_endian::{U32, U64};
use zerocopy_derive::*;

/// Build metadata for the platform's configuration manager.
/// Equivalent to CM_STD_OBJ_CONFIGURATION_MANAGER_INFO.
///
/// The values act as the defaults for the OEM and creator fields of every table header.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ConfigurationManagerInfo {
    /// Revision of the configuration manager.
    pub revision: U32,
    /// Platform vendor.
    pub oem_id: [u8; 6],
    /// Product variant for platform vendor, packed as a 64-bit signature.
    pub oem_table_id: U64,
    // Platform edition (OEM-defined). Not to be confused with ACPI revision.
    pub oem_revision: U32,
    /// ID of the tool used to generate the ACPI tables.
    pub creator_id: U32,
    /// Version of the tool used to generate the ACPI tables.
    pub creator_revision: U32,
}

impl ConfigurationManagerInfo {
    pub const fn new(
        revision: u32,
        oem_id: [u8; 6],
        oem_table_id: u64,
        oem_revision: u32,
        creator_id: u32,
        creator_revision: u32,
    ) -> Self {
        Self {
            revision: U32::new(revision),
            oem_id,
            oem_table_id: U64::new(oem_table_id),
            oem_revision: U32::new(oem_revision),
            creator_id: U32::new(creator_id),
            creator_revision: U32::new(creator_revision),
        }
    }
}
