//! Configuration Manager object identifiers.
//!
//! Every object the configuration manager exposes is addressed by a 32-bit id. The top nibble
//! selects a namespace and the low byte selects an object within that namespace. The bits in
//! between are reserved and must be zero.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use core::fmt;

const NAMESPACE_SHIFT: u32 = 28;
const OBJECT_ID_MASK: u32 = 0xFF;
const RESERVED_MASK: u32 = 0x0FFF_FF00;

/// Token selecting one instance of an object, or `CM_NULL_TOKEN` for all of them.
pub type CmObjectToken = usize;

pub const CM_NULL_TOKEN: CmObjectToken = 0;

/// Object namespaces understood by the configuration manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CmObjectNamespace {
    Standard = 0x0,
    Arm = 0x1,
    Oem = 0x8,
}

impl CmObjectNamespace {
    fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x0 => Some(Self::Standard),
            0x1 => Some(Self::Arm),
            0x8 => Some(Self::Oem),
            _ => None,
        }
    }
}

/// Objects in the standard namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StdObjectId {
    ConfigurationManagerInfo = 0,
    AcpiTableList = 1,
    SmbiosTableList = 2,
}

/// A configuration manager object id.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CmObjectId(u32);

impl CmObjectId {
    /// The configuration manager build metadata object.
    pub const STD_CONFIGURATION_MANAGER_INFO: Self = Self::standard(StdObjectId::ConfigurationManagerInfo);
    pub const STD_ACPI_TABLE_LIST: Self = Self::standard(StdObjectId::AcpiTableList);
    pub const STD_SMBIOS_TABLE_LIST: Self = Self::standard(StdObjectId::SmbiosTableList);

    pub const fn new(namespace: CmObjectNamespace, object_id: u8) -> Self {
        Self(((namespace as u32) << NAMESPACE_SHIFT) | object_id as u32)
    }

    pub const fn standard(object_id: StdObjectId) -> Self {
        Self::new(CmObjectNamespace::Standard, object_id as u8)
    }

    /// Wraps a raw id, e.g. one read back from an object descriptor. The id is not validated.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the namespace, or `None` when the namespace nibble is unknown.
    pub fn namespace(self) -> Option<CmObjectNamespace> {
        CmObjectNamespace::from_raw(self.0 >> NAMESPACE_SHIFT)
    }

    pub const fn object_id(self) -> u8 {
        (self.0 & OBJECT_ID_MASK) as u8
    }

    /// An id is well formed when its namespace is known and no reserved bits are set.
    pub fn is_valid(self) -> bool {
        self.0 & RESERVED_MASK == 0 && self.namespace().is_some()
    }
}

impl fmt::Debug for CmObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CmObjectId({:#010X})", self.0)
    }
}
