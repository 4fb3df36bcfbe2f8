//! Header assembly against a statically configured platform.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use patina_dynamic_tables::{
    acpi_table::{AcpiTableHeader, is_checksum_valid},
    cm_object::{CM_NULL_TOKEN, CmObjectId, CmObjectNamespace},
    config::ConfigurationManagerInfo,
    error::DynamicTablesError,
    generator::AcpiTableGenerator,
    service::{CmObjectEntry, ConfigurationManager, StaticConfigurationManager},
    signature::{self, ACPI_HEADER_LEN, signature32, signature64},
    table_helper::{add_acpi_header, get_cfg_mgr_info, get_cm_object},
};
use zerocopy::IntoBytes;

fn leak(bytes: &[u8]) -> &'static [u8] {
    Box::leak(bytes.to_vec().into_boxed_slice())
}

fn platform() -> StaticConfigurationManager {
    let info =
        ConfigurationManagerInfo::new(1, *b"CONTSO", signature64(b"PLATFORM"), 0x20, signature32(b"PTNA"), 0x0102);
    let oem_records: [[u8; 4]; 3] = [[1, 0, 0, 0], [2, 0, 0, 0], [3, 0, 0, 0]];
    let objects = Box::leak(Box::new([
        CmObjectEntry::new(CmObjectId::STD_CONFIGURATION_MANAGER_INFO, leak(info.as_bytes()), 1),
        CmObjectEntry::new(CmObjectId::new(CmObjectNamespace::Oem, 7), leak(oem_records.as_flattened()), 3),
    ]));
    StaticConfigurationManager::new(objects)
}

#[test]
fn header_is_stamped_from_platform_info() {
    let cfg_mgr = platform();
    let generator = AcpiTableGenerator::new(0x10, "SSDT", signature::SSDT, 2);

    let mut table = [0xAAu8; 64];
    add_acpi_header(&cfg_mgr, &generator, &mut table, 64).unwrap();

    let header = AcpiTableHeader::read_from_table(&table).unwrap();
    assert_eq!(header.signature.get(), signature::SSDT);
    assert_eq!(header.length.get(), 64);
    assert_eq!(header.revision, 2);
    assert_eq!(header.oem_id, *b"CONTSO");
    assert_eq!(header.oem_table_id, *b"PLATFORM");
    assert_eq!(header.oem_revision.get(), 0x20);
    assert_eq!(&header.creator_id.get().to_le_bytes(), b"PTNA");
    assert_eq!(header.creator_revision.get(), 0x0102);
    assert!(is_checksum_valid(&table));
    assert!(table[ACPI_HEADER_LEN..].iter().all(|&b| b == 0xAA));
}

#[test]
fn header_covers_only_the_declared_length() {
    let cfg_mgr = platform();
    let generator = AcpiTableGenerator::new(0x10, "SSDT", signature::SSDT, 2);

    let mut table = [0u8; 80];
    table[60] = 0x5A;
    add_acpi_header(&cfg_mgr, &generator, &mut table, 48).unwrap();

    assert!(is_checksum_valid(&table[..48]));
    assert_eq!(table[60], 0x5A);
}

#[test]
fn missing_platform_info_leaves_table_untouched() {
    let cfg_mgr = StaticConfigurationManager::new(&[]);
    let generator = AcpiTableGenerator::new(0x10, "SSDT", signature::SSDT, 2);

    let mut table = [0x11u8; 40];
    assert_eq!(add_acpi_header(&cfg_mgr, &generator, &mut table, 40), Err(DynamicTablesError::NotFound));
    assert!(table.iter().all(|&b| b == 0x11));
}

#[test]
fn platform_objects_are_typed_views() {
    let cfg_mgr = platform();

    let info = get_cfg_mgr_info(&cfg_mgr).unwrap();
    assert_eq!(info.oem_id, *b"CONTSO");

    let records: &[[u8; 4]] =
        get_cm_object(&cfg_mgr, CmObjectId::new(CmObjectNamespace::Oem, 7), CM_NULL_TOKEN).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2], [3, 0, 0, 0]);

    assert_eq!(
        cfg_mgr.get_object(CmObjectId::STD_ACPI_TABLE_LIST, CM_NULL_TOKEN),
        Err(DynamicTablesError::NotFound)
    );
}
