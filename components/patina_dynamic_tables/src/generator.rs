//! ACPI Table Generator descriptors.
//!
//! A generator owns the assembly logic of one table type. The descriptor carries the identity
//! stamped into that table's header.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use zerocopy::byteorder::little_endian::U32;

use crate::acpi_table::AcpiTableHeader;
use crate::config::ConfigurationManagerInfo;

/// Header fields a generator may brand its table with.
///
/// A `Some` value replaces the default taken from [`ConfigurationManagerInfo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderOverrides {
    pub oem_id: Option<[u8; 6]>,
    pub oem_table_id: Option<u64>,
    pub oem_revision: Option<u32>,
    pub creator_id: Option<u32>,
    pub creator_revision: Option<u32>,
}

impl HeaderOverrides {
    /// No overrides; every field comes from the configuration manager.
    pub const NONE: Self =
        Self { oem_id: None, oem_table_id: None, oem_revision: None, creator_id: None, creator_revision: None };
}

/// Describes an ACPI table generator.
/// Equivalent to ACPI_TABLE_GENERATOR, less the build callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcpiTableGenerator {
    pub generator_id: u32,
    pub description: &'static str,
    pub acpi_table_signature: u32,
    pub acpi_table_revision: u8,
    /// Oldest table revision this generator can produce.
    pub min_acpi_table_revision: u8,
    pub overrides: HeaderOverrides,
}

impl AcpiTableGenerator {
    pub const fn new(generator_id: u32, description: &'static str, signature: u32, revision: u8) -> Self {
        Self {
            generator_id,
            description,
            acpi_table_signature: signature,
            acpi_table_revision: revision,
            min_acpi_table_revision: revision,
            overrides: HeaderOverrides::NONE,
        }
    }

    pub const fn with_min_revision(mut self, min_revision: u8) -> Self {
        self.min_acpi_table_revision = min_revision;
        self
    }

    pub const fn with_overrides(mut self, overrides: HeaderOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Whether the revision the generator stamps is one it claims to support.
    pub fn is_revision_supported(&self) -> bool {
        self.acpi_table_revision >= self.min_acpi_table_revision
    }

    /// Builds a header for a table of `length` bytes, with a zero checksum.
    pub fn header_for(&self, cfg_mfr_info: &ConfigurationManagerInfo, length: u32) -> AcpiTableHeader {
        let overrides = &self.overrides;
        AcpiTableHeader {
            signature: U32::new(self.acpi_table_signature),
            length: U32::new(length),
            revision: self.acpi_table_revision,
            checksum: 0,
            oem_id: overrides.oem_id.unwrap_or(cfg_mfr_info.oem_id),
            oem_table_id: overrides.oem_table_id.unwrap_or(cfg_mfr_info.oem_table_id.get()).to_le_bytes(),
            oem_revision: U32::new(overrides.oem_revision.unwrap_or(cfg_mfr_info.oem_revision.get())),
            creator_id: U32::new(overrides.creator_id.unwrap_or(cfg_mfr_info.creator_id.get())),
            creator_revision: U32::new(overrides.creator_revision.unwrap_or(cfg_mfr_info.creator_revision.get())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{self, signature32, signature64};

    const CFG_MGR_INFO: ConfigurationManagerInfo =
        ConfigurationManagerInfo::new(1, *b"ARMLTD", signature64(b"ARMREF  "), 2, signature32(b"ARMH"), 3);

    #[test]
    fn test_header_defaults_to_configuration_values() {
        let generator = AcpiTableGenerator::new(1, "SSDT", signature::SSDT, 2);
        let header = generator.header_for(&CFG_MGR_INFO, 100);

        assert_eq!(header.signature.get(), signature::SSDT);
        assert_eq!(header.length.get(), 100);
        assert_eq!(header.revision, 2);
        assert_eq!(header.oem_id, *b"ARMLTD");
        assert_eq!(header.oem_table_id, *b"ARMREF  ");
        assert_eq!(header.oem_revision.get(), 2);
        assert_eq!(header.creator_id.get(), signature32(b"ARMH"));
        assert_eq!(header.creator_revision.get(), 3);
    }

    #[test]
    fn test_generator_overrides_win() {
        let generator = AcpiTableGenerator::new(1, "SSDT", signature::SSDT, 2).with_overrides(HeaderOverrides {
            oem_id: Some(*b"MSFT  "),
            creator_revision: Some(0x00010001),
            ..HeaderOverrides::NONE
        });
        let header = generator.header_for(&CFG_MGR_INFO, 36);

        assert_eq!(header.oem_id, *b"MSFT  ");
        assert_eq!(header.creator_revision.get(), 0x00010001);
        // Fields without an override keep the configuration default.
        assert_eq!(header.oem_table_id, *b"ARMREF  ");
        assert_eq!(header.creator_id.get(), signature32(b"ARMH"));
    }

    #[test]
    fn test_revision_range() {
        assert!(AcpiTableGenerator::new(1, "FADT", signature::FADT, 6).with_min_revision(5).is_revision_supported());
        assert!(!AcpiTableGenerator::new(1, "FADT", signature::FADT, 4).with_min_revision(5).is_revision_supported());
    }
}
