//! PRMT generator descriptor.
//!
//! The PRMT is branded with its own OEM and creator identity instead of the platform defaults.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use patina_dynamic_tables::generator::{AcpiTableGenerator, HeaderOverrides};
use patina_dynamic_tables::signature::{signature32, signature64};

use crate::prm_table::{PRM_TABLE_REVISION, PRM_TABLE_SIGNATURE};

pub const PRM_TABLE_OEM_ID: [u8; 6] = *b"MSFT  ";
pub const PRM_TABLE_OEM_TABLE_ID: u64 = signature64(b"TESTPRMT");
pub const PRM_TABLE_OEM_REVISION: u32 = 0x00000001;
pub const PRM_TABLE_CREATOR_ID: u32 = signature32(b"MSFT");
pub const PRM_TABLE_CREATOR_REVISION: u32 = 0x00010001;

pub const PRMT_GENERATOR_ID: u32 = PRM_TABLE_SIGNATURE;

/// Generator descriptor for the PRMT.
pub const PRMT_GENERATOR: AcpiTableGenerator =
    AcpiTableGenerator::new(PRMT_GENERATOR_ID, "PRMT", PRM_TABLE_SIGNATURE, PRM_TABLE_REVISION).with_overrides(
        HeaderOverrides {
            oem_id: Some(PRM_TABLE_OEM_ID),
            oem_table_id: Some(PRM_TABLE_OEM_TABLE_ID),
            oem_revision: Some(PRM_TABLE_OEM_REVISION),
            creator_id: Some(PRM_TABLE_CREATOR_ID),
            creator_revision: Some(PRM_TABLE_CREATOR_REVISION),
        },
    );

#[cfg(test)]
mod tests {
    use super::*;
    use patina_dynamic_tables::config::ConfigurationManagerInfo;

    #[test]
    fn prmt_identity_ignores_platform_defaults() {
        let cfg_mfr_info = ConfigurationManagerInfo::new(1, *b"OEMOEM", signature64(b"PLATFORM"), 9, 0, 0);
        let header = PRMT_GENERATOR.header_for(&cfg_mfr_info, 44);

        assert_eq!(&header.signature.get().to_le_bytes(), b"PRMT");
        assert_eq!(header.revision, 0);
        assert_eq!(header.oem_id, *b"MSFT  ");
        assert_eq!(header.oem_table_id, *b"TESTPRMT");
        assert_eq!(header.oem_revision.get(), 1);
        assert_eq!(&header.creator_id.get().to_le_bytes(), b"MSFT");
        assert_eq!(header.creator_revision.get(), 0x00010001);
    }
}
