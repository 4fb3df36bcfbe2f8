//! PRM ACPI Table Definitions.
//!
//! Defines the byte layout of the Platform Runtime Mechanism (PRM) ACPI table (PRMT).
//!
//! ```text
//! PRMT:        AcpiTableHeader | PrmModuleInfoOffset | PrmModuleInfoCount | ModuleInfo[...]
//! ModuleInfo:  fixed fields (48 bytes) | HandlerInfo[HandlerCount]
//! HandlerInfo: fixed fields (40 bytes)
//! ```
//!
//! Every entry carries its own length, and every offset is relative to the structure that
//! declares it, so the table can be walked without any other metadata.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use core::fmt;
use core::mem;
use core::num::NonZeroU64;

use patina_dynamic_tables::acpi_table::AcpiTableHeader;
use patina_dynamic_tables::signature::{ACPI_HEADER_LEN, signature32};
use zerocopy::byteorder::little_endian::{U16, U32, U64};
use zerocopy_derive::*;

pub const PRM_TABLE_SIGNATURE: u32 = signature32(b"PRMT");
pub const PRM_TABLE_REVISION: u8 = 0x0;

pub const PRM_MODULE_INFORMATION_STRUCT_REVISION: u16 = 0x00;
pub const PRM_HANDLER_INFORMATION_STRUCT_REVISION: u16 = 0x00;

/// Size of the PRMT ahead of the module info array.
pub const PRM_TABLE_FIXED_LEN: usize = mem::size_of::<PrmAcpiDescriptionTable>();
/// Size of a module info structure, not counting its handler info array.
pub const PRM_MODULE_INFO_FIXED_LEN: usize = mem::size_of::<PrmModuleInformationStruct>();
pub const PRM_HANDLER_INFO_LEN: usize = mem::size_of::<PrmHandlerInformationStruct>();

/// Offset of the module info array from the start of the PRMT.
pub const PRM_MODULE_INFO_OFFSET: usize = PRM_TABLE_FIXED_LEN;
/// Offset of the handler info array from the start of a module info structure.
pub const PRM_HANDLER_INFO_OFFSET: usize = PRM_MODULE_INFO_FIXED_LEN;

/// A physical address embedded in the PRMT.
///
/// The address is never dereferenced while the table is built. A missing address is written as zero,
/// so a `PhysicalAddress` itself is never zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysicalAddress(NonZeroU64);

impl PhysicalAddress {
    /// Returns `None` for the null address.
    pub const fn new(address: u64) -> Option<Self> {
        match NonZeroU64::new(address) {
            Some(address) => Some(Self(address)),
            None => None,
        }
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Converts an optional address to its table encoding.
    pub fn to_raw(address: Option<Self>) -> u64 {
        address.map_or(0, Self::get)
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysicalAddress({:#x})", self.get())
    }
}

/// Describes one PRM handler.
/// Equivalent to PRM_HANDLER_INFORMATION_STRUCT.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PrmHandlerInformationStruct {
    pub structure_revision: U16,
    pub structure_length: U16,
    /// GUID of the PRM handler.
    pub identifier: [u8; 16],
    pub reserved: U32,
    /// Physical address of the handler entry point.
    pub physical_address: U64,
    /// Physical address of the handler's context buffer (PRM_CONTEXT_BUFFER), or zero.
    pub prm_context_buffer: U64,
}

/// Describes one PRM module. The handler info array follows at `handler_info_offset`.
/// Equivalent to PRM_MODULE_INFORMATION_STRUCT, less the trailing handler array.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PrmModuleInformationStruct {
    pub structure_revision: U16,
    /// Length of this structure including the handler info array.
    pub structure_length: U16,
    /// GUID of the PRM module.
    pub identifier: [u8; 16],
    pub major_revision: U16,
    pub minor_revision: U16,
    pub handler_count: U32,
    /// Offset in bytes from the start of this structure to the handler info array.
    pub handler_info_offset: U32,
    /// Physical address of the module update lock descriptor, or zero.
    pub module_update_lock: U64,
    /// Physical address of the runtime MMIO ranges structure, or zero.
    pub runtime_mmio_ranges: U64,
}

/// The fixed part of the PRMT. The module info array follows at `prm_module_info_offset`.
/// Equivalent to PRM_ACPI_DESCRIPTION_TABLE, less the trailing module array.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PrmAcpiDescriptionTable {
    pub header: AcpiTableHeader,
    /// Offset in bytes from the start of the table to the module info array.
    pub prm_module_info_offset: U32,
    pub prm_module_info_count: U32,
}

const _: () = assert!(PRM_TABLE_FIXED_LEN == ACPI_HEADER_LEN + 8);
const _: () = assert!(PRM_MODULE_INFO_FIXED_LEN == 48);
const _: () = assert!(PRM_HANDLER_INFO_LEN == 40);
