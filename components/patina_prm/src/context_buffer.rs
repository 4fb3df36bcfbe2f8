//! PRM context buffer layouts.
//!
//! A handler entry in the PRMT may point at a context buffer. The context buffer in turn points at
//! the module's static data buffer and its runtime MMIO ranges. These structures are laid out here;
//! they are only ever read by the runtime dispatcher.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use alloc::vec::Vec;
use core::mem;

use patina_dynamic_tables::signature::signature32;
use r_efi::efi;
use zerocopy::IntoBytes;
use zerocopy::byteorder::little_endian::{U16, U32, U64};
use zerocopy_derive::*;

use crate::error::{PrmError, Result};
use crate::prm_table::PhysicalAddress;

pub const PRM_CONTEXT_BUFFER_SIGNATURE: u32 = signature32(b"PRMC");
pub const PRM_CONTEXT_BUFFER_INTERFACE_VERSION: u16 = 1;
pub const PRM_DATA_BUFFER_HEADER_SIGNATURE: u32 = signature32(b"PRMD");

/// Context handed to a PRM handler.
/// Equivalent to PRM_CONTEXT_BUFFER.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PrmContextBuffer {
    pub signature: U32,
    pub version: U16,
    pub reserved: U16,
    pub handler_guid: [u8; 16],
    /// Physical address of the module's static data buffer (PRM_DATA_BUFFER), or zero.
    pub static_data_buffer: U64,
    /// Physical address of the module's runtime MMIO ranges (PRM_RUNTIME_MMIO_RANGES), or zero.
    pub runtime_mmio_ranges: U64,
}

impl PrmContextBuffer {
    pub fn new(
        handler_guid: &efi::Guid,
        static_data_buffer: Option<PhysicalAddress>,
        runtime_mmio_ranges: Option<PhysicalAddress>,
    ) -> Self {
        Self {
            signature: U32::new(PRM_CONTEXT_BUFFER_SIGNATURE),
            version: U16::new(PRM_CONTEXT_BUFFER_INTERFACE_VERSION),
            reserved: U16::new(0),
            handler_guid: *handler_guid.as_bytes(),
            static_data_buffer: U64::new(PhysicalAddress::to_raw(static_data_buffer)),
            runtime_mmio_ranges: U64::new(PhysicalAddress::to_raw(runtime_mmio_ranges)),
        }
    }

    pub fn handler_guid(&self) -> efi::Guid {
        efi::Guid::from_bytes(&self.handler_guid)
    }

    pub fn is_valid(&self) -> bool {
        self.signature.get() == PRM_CONTEXT_BUFFER_SIGNATURE
            && self.version.get() == PRM_CONTEXT_BUFFER_INTERFACE_VERSION
    }
}

/// Header of a PRM data buffer. `length` covers the header and the data that follows it.
/// Equivalent to PRM_DATA_BUFFER_HEADER.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PrmDataBufferHeader {
    pub signature: U32,
    pub length: U32,
}

/// Builds a PRM data buffer carrying `data`.
pub fn prm_data_buffer(data: &[u8]) -> Result<Vec<u8>> {
    let length = mem::size_of::<PrmDataBufferHeader>() + data.len();
    let header = PrmDataBufferHeader {
        signature: U32::new(PRM_DATA_BUFFER_HEADER_SIGNATURE),
        length: U32::new(u32::try_from(length).map_err(|_| PrmError::DataBufferTooLarge)?),
    };

    let mut buffer = Vec::with_capacity(length);
    buffer.extend_from_slice(header.as_bytes());
    buffer.extend_from_slice(data);
    Ok(buffer)
}

/// One MMIO range a PRM module accesses at runtime.
/// Equivalent to PRM_RUNTIME_MMIO_RANGE.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PrmRuntimeMmioRange {
    pub physical_base_address: U64,
    /// Filled in by the loader when the OS sets the virtual address map.
    pub virtual_base_address: U64,
    pub length: U32,
}

impl PrmRuntimeMmioRange {
    /// A range whose virtual address is not yet known.
    pub const fn new(physical_base_address: u64, length: u32) -> Self {
        Self {
            physical_base_address: U64::new(physical_base_address),
            virtual_base_address: U64::new(0),
            length: U32::new(length),
        }
    }
}

/// Builds a PRM_RUNTIME_MMIO_RANGES structure: a 64-bit count followed by the ranges.
pub fn prm_runtime_mmio_ranges(ranges: &[PrmRuntimeMmioRange]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(mem::size_of::<u64>() + mem::size_of_val(ranges));
    buffer.extend_from_slice(&(ranges.len() as u64).to_le_bytes());
    buffer.extend_from_slice(ranges.as_bytes());
    buffer
}

pub const SOME_VALUE_ARRAY_MAX_VALUES: usize = 16;

/// Static data of the sample context buffer PRM module.
/// Equivalent to STATIC_DATA_SAMPLE_CONTEXT_BUFFER_MODULE.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct StaticDataSampleContextBufferModule {
    pub policy1_enabled: u8,
    pub policy2_enabled: u8,
    pub some_value_array: [u8; SOME_VALUE_ARRAY_MAX_VALUES],
}

impl StaticDataSampleContextBufferModule {
    pub fn new(
        policy1_enabled: bool,
        policy2_enabled: bool,
        some_value_array: [u8; SOME_VALUE_ARRAY_MAX_VALUES],
    ) -> Self {
        Self { policy1_enabled: policy1_enabled as u8, policy2_enabled: policy2_enabled as u8, some_value_array }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerocopy::FromBytes;

    const HANDLER_GUID: efi::Guid =
        efi::Guid::from_fields(0xE1466081, 0x7562, 0x430F, 0x89, 0x6B, &[0xB0, 0xE5, 0x23, 0xDC, 0x33, 0x5A]);

    #[test]
    fn test_context_buffer_layout() {
        let context = PrmContextBuffer::new(&HANDLER_GUID, PhysicalAddress::new(0x8000), None);
        let bytes = context.as_bytes();

        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[0..4], b"PRMC");
        assert_eq!(&bytes[4..6], &1u16.to_le_bytes());
        assert_eq!(&bytes[8..24], HANDLER_GUID.as_bytes());
        assert_eq!(&bytes[24..32], &0x8000u64.to_le_bytes());
        assert_eq!(&bytes[32..40], &[0; 8]);
        assert!(context.is_valid());
        assert_eq!(context.handler_guid(), HANDLER_GUID);
    }

    #[test]
    fn test_data_buffer_length_covers_header() {
        let static_data = StaticDataSampleContextBufferModule::new(true, false, [7; SOME_VALUE_ARRAY_MAX_VALUES]);
        let buffer = prm_data_buffer(static_data.as_bytes()).unwrap();

        let (header, data) = PrmDataBufferHeader::read_from_prefix(&buffer).unwrap();
        assert_eq!(header.signature.get(), PRM_DATA_BUFFER_HEADER_SIGNATURE);
        assert_eq!(header.length.get() as usize, buffer.len());
        assert_eq!(buffer.len(), 8 + 18);

        let (static_data, _) = StaticDataSampleContextBufferModule::read_from_prefix(data).unwrap();
        assert_eq!(static_data.policy1_enabled, 1);
        assert_eq!(static_data.policy2_enabled, 0);
        assert_eq!(static_data.some_value_array, [7; SOME_VALUE_ARRAY_MAX_VALUES]);
    }

    #[test]
    fn test_runtime_mmio_ranges() {
        let ranges = [
            PrmRuntimeMmioRange::new(0xFED0_0000, 0x1000),
            PrmRuntimeMmioRange::new(0xFEE0_0000, 0x400),
        ];
        let buffer = prm_runtime_mmio_ranges(&ranges);

        assert_eq!(buffer.len(), 8 + 2 * 20);
        assert_eq!(&buffer[0..8], &2u64.to_le_bytes());
        assert_eq!(&buffer[8..16], &0xFED0_0000u64.to_le_bytes());
        assert_eq!(&buffer[24..28], &0x1000u32.to_le_bytes());
        assert_eq!(&buffer[28..36], &0xFEE0_0000u64.to_le_bytes());
    }
}
