//! PRM ACPI table builder.
//!
//! PRM modules are described with [`PrmModuleInfo`] and [`PrmHandlerInfo`] and collected in a
//! [`PrmtBuilder`]. Lengths and offsets are computed when the table is laid out, never supplied
//! by the caller. Finalizing validates the whole table, lays it out, and stamps the ACPI header
//! over it, producing a read-only [`PrmtTable`].
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;

use patina_dynamic_tables::acpi_table::AcpiTableHeader;
use patina_dynamic_tables::error::DynamicTablesError;
use patina_dynamic_tables::generator::AcpiTableGenerator;
use patina_dynamic_tables::service::ConfigurationManager;
use patina_dynamic_tables::table_helper::add_acpi_header;
use r_efi::efi;
use zerocopy::IntoBytes;
use zerocopy::byteorder::little_endian::{U16, U32, U64};

use crate::error::{PrmError, Result};
use crate::prm_table::{
    PRM_HANDLER_INFO_LEN, PRM_HANDLER_INFO_OFFSET, PRM_HANDLER_INFORMATION_STRUCT_REVISION, PRM_MODULE_INFO_FIXED_LEN,
    PRM_MODULE_INFO_OFFSET, PRM_MODULE_INFORMATION_STRUCT_REVISION, PRM_TABLE_FIXED_LEN, PRM_TABLE_SIGNATURE,
    PhysicalAddress, PrmAcpiDescriptionTable, PrmHandlerInformationStruct, PrmModuleInformationStruct,
};

/// One PRM handler exported by a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrmHandlerInfo {
    pub guid: efi::Guid,
    pub entry_point: PhysicalAddress,
    pub context_buffer: Option<PhysicalAddress>,
}

impl PrmHandlerInfo {
    pub const fn new(guid: efi::Guid, entry_point: PhysicalAddress) -> Self {
        Self { guid, entry_point, context_buffer: None }
    }

    pub const fn with_context_buffer(mut self, context_buffer: PhysicalAddress) -> Self {
        self.context_buffer = Some(context_buffer);
        self
    }

    fn to_information_struct(&self) -> PrmHandlerInformationStruct {
        PrmHandlerInformationStruct {
            structure_revision: U16::new(PRM_HANDLER_INFORMATION_STRUCT_REVISION),
            structure_length: U16::new(PRM_HANDLER_INFO_LEN as u16),
            identifier: *self.guid.as_bytes(),
            reserved: U32::new(0),
            physical_address: U64::new(self.entry_point.get()),
            prm_context_buffer: U64::new(PhysicalAddress::to_raw(self.context_buffer)),
        }
    }
}

/// One PRM module and the handlers it exports.
///
/// `handler_count` is the count the module declares (from its export descriptor). It must match
/// the handlers added before the table can be finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrmModuleInfo {
    pub guid: efi::Guid,
    pub major_revision: u16,
    pub minor_revision: u16,
    pub handler_count: u32,
    pub module_update_lock: Option<PhysicalAddress>,
    pub runtime_mmio_ranges: Option<PhysicalAddress>,
    handlers: Vec<PrmHandlerInfo>,
}

impl PrmModuleInfo {
    pub fn new(guid: efi::Guid, major_revision: u16, minor_revision: u16, handler_count: u32) -> Self {
        Self {
            guid,
            major_revision,
            minor_revision,
            handler_count,
            module_update_lock: None,
            runtime_mmio_ranges: None,
            handlers: Vec::new(),
        }
    }

    pub fn with_update_lock(mut self, module_update_lock: PhysicalAddress) -> Self {
        self.module_update_lock = Some(module_update_lock);
        self
    }

    pub fn with_runtime_mmio_ranges(mut self, runtime_mmio_ranges: PhysicalAddress) -> Self {
        self.runtime_mmio_ranges = Some(runtime_mmio_ranges);
        self
    }

    pub fn with_handler(mut self, handler: PrmHandlerInfo) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn add_handler(&mut self, handler: PrmHandlerInfo) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    pub fn handlers(&self) -> &[PrmHandlerInfo] {
        &self.handlers
    }

    /// Length of the module info structure including its handler info array.
    pub fn structure_length(&self) -> usize {
        PRM_MODULE_INFO_FIXED_LEN + self.handlers.len() * PRM_HANDLER_INFO_LEN
    }

    /// Checks the module on its own and returns its structure length.
    fn validate(&self) -> Result<u16> {
        let present = self.handlers.len();
        if self.handler_count as usize != present {
            return Err(PrmError::HandlerCountMismatch { module: self.guid, declared: self.handler_count, present });
        }

        let length = self.structure_length();
        let structure_length =
            u16::try_from(length).map_err(|_| PrmError::StructureTooLarge { module: self.guid, length })?;

        // With no handlers the handler array would start at the end of the structure.
        if PRM_HANDLER_INFO_OFFSET >= length {
            return Err(PrmError::OffsetOutOfRange { offset: PRM_HANDLER_INFO_OFFSET, length });
        }

        Ok(structure_length)
    }

    fn to_information_struct(&self, structure_length: u16) -> PrmModuleInformationStruct {
        PrmModuleInformationStruct {
            structure_revision: U16::new(PRM_MODULE_INFORMATION_STRUCT_REVISION),
            structure_length: U16::new(structure_length),
            identifier: *self.guid.as_bytes(),
            major_revision: U16::new(self.major_revision),
            minor_revision: U16::new(self.minor_revision),
            handler_count: U32::new(self.handler_count),
            handler_info_offset: U32::new(PRM_HANDLER_INFO_OFFSET as u32),
            module_update_lock: U64::new(PhysicalAddress::to_raw(self.module_update_lock)),
            runtime_mmio_ranges: U64::new(PhysicalAddress::to_raw(self.runtime_mmio_ranges)),
        }
    }
}

/// Where a PRMT is in its construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrmtState {
    /// No modules have been added.
    Empty,
    /// Modules are being added.
    Populating,
    /// The table is laid out and checksummed. Only a [`PrmtTable`] is in this state.
    Finalized,
}

/// Collects PRM modules and lays them out as a PRMT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrmtBuilder {
    modules: Vec<PrmModuleInfo>,
}

impl PrmtBuilder {
    pub fn new() -> Self {
        Self { modules: Vec::new() }
    }

    pub fn state(&self) -> PrmtState {
        if self.modules.is_empty() { PrmtState::Empty } else { PrmtState::Populating }
    }

    pub fn add_module(&mut self, module: PrmModuleInfo) -> &mut Self {
        log::debug!("Adding PRM module {:?} with {} handler(s)", module.guid, module.handlers.len());
        self.modules.push(module);
        self
    }

    pub fn modules(&self) -> &[PrmModuleInfo] {
        &self.modules
    }

    pub fn handler_count(&self) -> usize {
        self.modules.iter().map(|module| module.handlers.len()).sum()
    }

    /// Checks every layout rule the table must satisfy and returns the table length.
    ///
    /// ## Errors
    ///
    /// - `EmptyTable` if no module was added.
    /// - `HandlerCountMismatch` if a module's declared handler count differs from its handlers.
    /// - `StructureTooLarge` or `TableTooLarge` if a length field would overflow.
    /// - `OffsetOutOfRange` if an array offset does not fall inside its structure.
    /// - `DuplicateModuleGuid` or `DuplicateHandlerGuid` if an identifier is reused.
    pub fn validate(&self) -> Result<u32> {
        if self.modules.is_empty() {
            return Err(PrmError::EmptyTable);
        }

        let mut module_guids = BTreeSet::new();
        let mut handler_guids = BTreeSet::new();
        let mut table_length = PRM_TABLE_FIXED_LEN;

        for module in &self.modules {
            let structure_length = module.validate()?;

            if !module_guids.insert(*module.guid.as_bytes()) {
                return Err(PrmError::DuplicateModuleGuid(module.guid));
            }

            for handler in &module.handlers {
                if !handler_guids.insert(*handler.guid.as_bytes()) {
                    return Err(PrmError::DuplicateHandlerGuid(handler.guid));
                }
            }

            table_length = table_length.checked_add(structure_length as usize).ok_or(PrmError::TableTooLarge)?;
        }

        if PRM_MODULE_INFO_OFFSET >= table_length {
            return Err(PrmError::OffsetOutOfRange { offset: PRM_MODULE_INFO_OFFSET, length: table_length });
        }

        u32::try_from(table_length).map_err(|_| PrmError::TableTooLarge)
    }

    /// Total length of the table once laid out.
    pub fn table_length(&self) -> Result<u32> {
        self.validate()
    }

    /// Lays the table out at the start of `table` and stamps its header. Returns the table length.
    ///
    /// Nothing is written when validation fails or `table` is too small. If the header cannot be
    /// added, the table region of `table` is cleared so no unchecksummed table is left behind.
    pub fn finalize_into(
        &self,
        cfg_mgr: &dyn ConfigurationManager,
        generator: &AcpiTableGenerator,
        table: &mut [u8],
    ) -> Result<u32> {
        if generator.acpi_table_signature != PRM_TABLE_SIGNATURE {
            log::error!("Generator {} does not produce a PRMT", generator.description);
            return Err(PrmError::Table(DynamicTablesError::InvalidParameter));
        }

        let length = self.validate().inspect_err(|err| log::error!("PRMT validation failed: {err}"))?;
        let table_len = length as usize;
        if table.len() < table_len {
            return Err(PrmError::BufferTooSmall { required: table_len, actual: table.len() });
        }
        let table = &mut table[..table_len];

        let prmt = PrmAcpiDescriptionTable {
            header: AcpiTableHeader::default(),
            prm_module_info_offset: U32::new(PRM_MODULE_INFO_OFFSET as u32),
            prm_module_info_count: U32::new(self.modules.len() as u32),
        };
        table[..PRM_TABLE_FIXED_LEN].copy_from_slice(prmt.as_bytes());

        let mut offset = PRM_MODULE_INFO_OFFSET;
        for module in &self.modules {
            // Validation above already proved the length fits.
            let structure_length = module.structure_length();
            let module_info = module.to_information_struct(structure_length as u16);
            table[offset..offset + PRM_MODULE_INFO_FIXED_LEN].copy_from_slice(module_info.as_bytes());

            let mut handler_offset = offset + PRM_HANDLER_INFO_OFFSET;
            for handler in &module.handlers {
                let handler_info = handler.to_information_struct();
                table[handler_offset..handler_offset + PRM_HANDLER_INFO_LEN].copy_from_slice(handler_info.as_bytes());
                handler_offset += PRM_HANDLER_INFO_LEN;
            }

            log::debug!(
                "PRM module {:?} at offset {offset:#x}: length = {structure_length}, handlers = {}",
                module.guid,
                module.handlers.len()
            );
            offset += structure_length;
        }
        debug_assert_eq!(offset, table_len);

        if let Err(err) = add_acpi_header(cfg_mgr, generator, table, length) {
            log::error!("Failed to add the PRMT header: {err}");
            table.fill(0);
            return Err(err.into());
        }

        log::info!(
            "PRMT finalized: {} module(s), {} handler(s), {length} bytes",
            self.modules.len(),
            self.handler_count()
        );
        Ok(length)
    }

    /// Lays the table out in a buffer of its own and stamps its header.
    pub fn finalize(self, cfg_mgr: &dyn ConfigurationManager, generator: &AcpiTableGenerator) -> Result<PrmtTable> {
        let length = self.validate()?;
        let mut bytes = vec![0u8; length as usize].into_boxed_slice();
        self.finalize_into(cfg_mgr, generator, &mut bytes)?;
        Ok(PrmtTable { bytes, module_count: self.modules.len(), handler_count: self.handler_count() })
    }
}

/// A finalized PRMT. The table can no longer be changed; rebuilding it requires a new [`PrmtBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrmtTable {
    bytes: Box<[u8]>,
    module_count: usize,
    handler_count: usize,
}

impl PrmtTable {
    pub fn state(&self) -> PrmtState {
        PrmtState::Finalized
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn length(&self) -> usize {
        self.bytes.len()
    }

    pub fn header(&self) -> AcpiTableHeader {
        // The table always starts with a header; `finalize` never produces fewer bytes.
        AcpiTableHeader::read_from_table(&self.bytes).unwrap_or_default()
    }

    pub fn module_count(&self) -> usize {
        self.module_count
    }

    pub fn handler_count(&self) -> usize {
        self.handler_count
    }
}
