//! Platform Runtime Mechanism (PRM) ACPI Table
//!
//! Builds the PRMT, the ACPI table through which the OS discovers PRM modules and the handlers
//! they export.
//!
//! PRM modules are described with [`PrmModuleInfo`](builder::PrmModuleInfo) and collected in a
//! [`PrmtBuilder`](builder::PrmtBuilder). Finalizing the builder validates the table layout, lays
//! out every module and handler structure, and stamps the ACPI header through
//! [`add_acpi_header`](patina_dynamic_tables::table_helper::add_acpi_header) using the
//! [`PRMT_GENERATOR`](generator::PRMT_GENERATOR) identity.
//!
//! ## Examples and Usage
//!
//! ```
//! use patina_dynamic_tables::{
//!     cm_object::CmObjectId,
//!     config::ConfigurationManagerInfo,
//!     service::{CmObjectEntry, StaticConfigurationManager},
//!     signature::{signature32, signature64},
//! };
//! use patina_prm::{
//!     builder::{PrmHandlerInfo, PrmModuleInfo, PrmtBuilder},
//!     generator::PRMT_GENERATOR,
//!     prm_table::PhysicalAddress,
//! };
//! use r_efi::efi;
//! use zerocopy::IntoBytes;
//!
//! let info = ConfigurationManagerInfo::new(1, *b"OEMID ", signature64(b"PLATFORM"), 1, signature32(b"PTNA"), 1);
//! let data: &'static [u8] = Box::leak(info.as_bytes().to_vec().into_boxed_slice());
//! let objects = Box::leak(Box::new([CmObjectEntry::new(CmObjectId::STD_CONFIGURATION_MANAGER_INFO, data, 1)]));
//! let cfg_mgr = StaticConfigurationManager::new(objects);
//!
//! let module_guid =
//!     efi::Guid::from_fields(0x5A6CF42B, 0x8BB4, 0x472C, 0xA2, 0x33, &[0x5C, 0x4D, 0xC4, 0x03, 0x3D, 0xC7]);
//! let handler_guid =
//!     efi::Guid::from_fields(0xE1466081, 0x7562, 0x430F, 0x89, 0x6B, &[0xB0, 0xE5, 0x23, 0xDC, 0x33, 0x5A]);
//!
//! let mut builder = PrmtBuilder::new();
//! builder.add_module(
//!     PrmModuleInfo::new(module_guid, 1, 0, 1)
//!         .with_handler(PrmHandlerInfo::new(handler_guid, PhysicalAddress::new(0x7F00_1000).unwrap())),
//! );
//!
//! let table = builder.finalize(&cfg_mgr, &PRMT_GENERATOR).unwrap();
//! assert_eq!(table.length(), 44 + 48 + 40);
//! assert_eq!(table.as_bytes().iter().fold(0u8, |sum, &b| sum.wrapping_add(b)), 0);
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod builder;
pub mod context_buffer;
pub mod error;
pub mod generator;
pub mod prm_table;
