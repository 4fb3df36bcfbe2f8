//! Table helpers shared by ACPI table generators.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use core::mem;

use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::acpi_table::update_checksum;
use crate::cm_object::{CM_NULL_TOKEN, CmObjectId, CmObjectToken};
use crate::config::ConfigurationManagerInfo;
use crate::error::{DynamicTablesError, Result};
use crate::generator::AcpiTableGenerator;
use crate::service::{CmObjectDescriptor, ConfigurationManager};
use crate::signature::{ACPI_CHECKSUM_OFFSET, ACPI_HEADER_LEN};

/// Aligns `value` up to the next 32-bit word boundary.
pub const fn align32(value: usize) -> usize {
    (value + (mem::size_of::<u32>() - 1)) & !(mem::size_of::<u32>() - 1)
}

/// Queries `object_id` and checks the descriptor holds its declared count of `record_size` byte records.
///
/// A descriptor declaring fewer than `min_count` records is rejected as `BadBufferSize`.
fn query_object(
    cfg_mgr: &dyn ConfigurationManager,
    object_id: CmObjectId,
    token: CmObjectToken,
    record_size: usize,
    min_count: u32,
) -> Result<CmObjectDescriptor> {
    if !object_id.is_valid() {
        log::error!("Malformed configuration manager object id {object_id:?}");
        return Err(DynamicTablesError::InvalidParameter);
    }

    let descriptor = cfg_mgr.get_object(object_id, token).inspect_err(|err| {
        log::error!("Failed to get configuration manager object {object_id:?}: {err}");
    })?;

    if descriptor.object_id != object_id {
        log::error!("Configuration manager returned {:?} when {object_id:?} was requested", descriptor.object_id);
        return Err(DynamicTablesError::InvalidParameter);
    }

    if descriptor.count < min_count {
        log::error!(
            "Configuration manager object {object_id:?} declares {} record(s), expected at least {min_count}",
            descriptor.count
        );
        return Err(DynamicTablesError::BadBufferSize);
    }

    let count = descriptor.count as usize;
    let required = record_size.checked_mul(count).ok_or(DynamicTablesError::BadBufferSize)?;
    if (descriptor.size as usize) < required || descriptor.data.len() < required {
        log::error!(
            "Configuration manager object {object_id:?} is too small: size = {}, data = {}, expected = {required}",
            descriptor.size,
            descriptor.data.len()
        );
        return Err(DynamicTablesError::BadBufferSize);
    }

    Ok(descriptor)
}

/// Returns the records of configuration manager object `object_id`, reinterpreted in place.
///
/// The descriptor must declare at least `count * size_of::<T>()` bytes.
pub fn get_cm_object<T>(
    cfg_mgr: &dyn ConfigurationManager,
    object_id: CmObjectId,
    token: CmObjectToken,
) -> Result<&'static [T]>
where
    T: FromBytes + Immutable + KnownLayout + Unaligned,
{
    let descriptor = query_object(cfg_mgr, object_id, token, mem::size_of::<T>(), 0)?;
    <[T]>::ref_from_prefix_with_elems(descriptor.data, descriptor.count as usize)
        .map(|(records, _)| records)
        .map_err(|_| DynamicTablesError::BadBufferSize)
}

/// Gets the configuration manager info object.
///
/// ## Errors
///
/// - `InvalidParameter` if the configuration manager answers with a different object.
/// - `NotFound` if the configuration manager does not provide the object.
/// - `BadBufferSize` if the object is smaller than [`ConfigurationManagerInfo`].
pub fn get_cfg_mgr_info(cfg_mgr: &dyn ConfigurationManager) -> Result<&'static ConfigurationManagerInfo> {
    let object_id = CmObjectId::STD_CONFIGURATION_MANAGER_INFO;
    let descriptor = query_object(cfg_mgr, object_id, CM_NULL_TOKEN, mem::size_of::<ConfigurationManagerInfo>(), 1)?;

    let (cfg_mfr_info, _) =
        ConfigurationManagerInfo::ref_from_prefix(descriptor.data).map_err(|_| DynamicTablesError::BadBufferSize)?;

    log::debug!(
        "Configuration manager info: revision = {:#x}, oem_revision = {:#x}",
        cfg_mfr_info.revision.get(),
        cfg_mfr_info.oem_revision.get()
    );
    Ok(cfg_mfr_info)
}

/// Populates the ACPI header at the start of `table` and checksums the table.
///
/// `length` is the total length of the table, including the header. The body after the header
/// is expected to be in place already; it is covered by the checksum but not inspected.
///
/// All inputs are validated and the configuration manager is queried before `table` is written,
/// so on error `table` is left untouched.
///
/// ## Errors
///
/// - `InvalidParameter` if `length` cannot hold a header, exceeds `table`, or the generator's revision is unsupported.
/// - Any error from [`get_cfg_mgr_info`].
pub fn add_acpi_header(
    cfg_mgr: &dyn ConfigurationManager,
    generator: &AcpiTableGenerator,
    table: &mut [u8],
    length: u32,
) -> Result<()> {
    let table_len = length as usize;
    if table_len < ACPI_HEADER_LEN || table_len > table.len() {
        log::error!(
            "Invalid length {length} for {} table (buffer = {}, header = {ACPI_HEADER_LEN})",
            generator.description,
            table.len()
        );
        return Err(DynamicTablesError::InvalidParameter);
    }

    if !generator.is_revision_supported() {
        log::error!(
            "{} generator revision {} is below its minimum revision {}",
            generator.description,
            generator.acpi_table_revision,
            generator.min_acpi_table_revision
        );
        return Err(DynamicTablesError::InvalidParameter);
    }

    let cfg_mfr_info = get_cfg_mgr_info(cfg_mgr)?;
    let header = generator.header_for(cfg_mfr_info, length);

    let table = &mut table[..table_len];
    header.write_to_table(table)?;
    update_checksum(table, ACPI_CHECKSUM_OFFSET)?;

    log::debug!(
        "Added ACPI header: signature = {:?}, length = {length}, checksum = {:#04x}",
        core::str::from_utf8(&generator.acpi_table_signature.to_le_bytes()).unwrap_or("????"),
        table[ACPI_CHECKSUM_OFFSET]
    );
    Ok(())
}
