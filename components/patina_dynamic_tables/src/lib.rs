//! Dynamic ACPI Table Helpers
//!
//! This library provides the primitives ACPI table generators use to turn platform configuration
//! into standards-compliant description tables.
//!
//! A generator first asks the [`ConfigurationManager`](service::ConfigurationManager) for the
//! platform's build metadata, lays out its table body in a buffer it owns, and then calls
//! [`add_acpi_header`](table_helper::add_acpi_header) to stamp and checksum the header.
//!
//! ## Examples and Usage
//!
//! ```
//! use patina_dynamic_tables::{
//!     cm_object::CmObjectId,
//!     config::ConfigurationManagerInfo,
//!     generator::AcpiTableGenerator,
//!     service::{CmObjectEntry, StaticConfigurationManager},
//!     signature::{self, signature32, signature64},
//!     table_helper::add_acpi_header,
//! };
//! use zerocopy::IntoBytes;
//!
//! let info = ConfigurationManagerInfo::new(1, *b"OEMID ", signature64(b"PLATFORM"), 1, signature32(b"PTNA"), 1);
//! let data: &'static [u8] = Box::leak(info.as_bytes().to_vec().into_boxed_slice());
//! let objects = Box::leak(Box::new([CmObjectEntry::new(CmObjectId::STD_CONFIGURATION_MANAGER_INFO, data, 1)]));
//!
//! let cfg_mgr = StaticConfigurationManager::new(objects);
//! let generator = AcpiTableGenerator::new(1, "SSDT", signature::SSDT, 2);
//!
//! let mut table = [0u8; 40];
//! add_acpi_header(&cfg_mgr, &generator, &mut table, 40).unwrap();
//! assert_eq!(table.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)), 0);
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

#![cfg_attr(not(test), no_std)]

pub mod acpi_table;
pub mod cm_object;
pub mod config;
pub mod error;
pub mod generator;
pub mod service;
pub mod signature;
pub mod table_helper;
