//! Configuration Manager Service Definitions.
//!
//! Defines the interface table generators use to query platform configuration.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::cm_object::{CM_NULL_TOKEN, CmObjectId, CmObjectToken};
use crate::error::{DynamicTablesError, Result};

/// Describes one object returned by the configuration manager.
/// Equivalent to CM_OBJ_DESCRIPTOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmObjectDescriptor {
    /// The id of the object being described.
    pub object_id: CmObjectId,
    /// Size in bytes the configuration manager declares for `data`.
    pub size: u32,
    /// Object data. Configuration data lives for the remainder of the boot phase.
    pub data: &'static [u8],
    /// Number of objects of this type packed into `data`.
    pub count: u32,
}

/// The `ConfigurationManager` trait provides access to platform configuration objects.
/// This trait is the boundary between table generators and whatever component holds the platform description.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigurationManager {
    /// Returns the object identified by `object_id`.
    ///
    /// `token` selects a single instance of the object; `CM_NULL_TOKEN` returns every instance.
    ///
    /// Implementations return `NotFound` when they do not carry the object and `InvalidParameter`
    /// when `object_id` is malformed.
    fn get_object(&self, object_id: CmObjectId, token: CmObjectToken) -> Result<CmObjectDescriptor>;
}

/// A single object held by a [`StaticConfigurationManager`].
#[derive(Debug, Clone, Copy)]
pub struct CmObjectEntry {
    pub object_id: CmObjectId,
    pub token: CmObjectToken,
    pub data: &'static [u8],
    pub count: u32,
}

impl CmObjectEntry {
    pub const fn new(object_id: CmObjectId, data: &'static [u8], count: u32) -> Self {
        Self { object_id, token: CM_NULL_TOKEN, data, count }
    }

    pub const fn with_token(mut self, token: CmObjectToken) -> Self {
        self.token = token;
        self
    }
}

/// A configuration manager backed by a fixed list of objects.
///
/// Intended for platforms whose configuration is known at build time.
#[derive(Debug, Clone, Copy)]
pub struct StaticConfigurationManager {
    objects: &'static [CmObjectEntry],
}

impl StaticConfigurationManager {
    pub const fn new(objects: &'static [CmObjectEntry]) -> Self {
        Self { objects }
    }
}

impl ConfigurationManager for StaticConfigurationManager {
    fn get_object(&self, object_id: CmObjectId, token: CmObjectToken) -> Result<CmObjectDescriptor> {
        if !object_id.is_valid() {
            return Err(DynamicTablesError::InvalidParameter);
        }

        let entry = self
            .objects
            .iter()
            .find(|entry| entry.object_id == object_id && (token == CM_NULL_TOKEN || entry.token == token))
            .ok_or(DynamicTablesError::NotFound)?;

        Ok(CmObjectDescriptor {
            object_id: entry.object_id,
            size: declared_size(entry.data.len())?,
            data: entry.data,
            count: entry.count,
        })
    }
}

/// Converts an object's length to the 32-bit size a descriptor declares.
fn declared_size(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| DynamicTablesError::BadBufferSize)
}
