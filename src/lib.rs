/*******************************************************************************
*   (c) 2018-2024 Zondax AG
*
*  Licensed under the Apache License, Version 2.0 (the "License");
*  you may not use this file except in compliance with the License.
*  You may obtain a copy of the License at
*
*      http://www.apache.org/licenses/LICENSE-2.0
*
*  Unless required by applicable law or agreed to in writing, software
*  distributed under the License is distributed on an "AS IS" BASIS,
*  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
*  See the License for the specific language governing permissions and
*  limitations under the License.
********************************************************************************/
//! Support library for the Zilliqa Ledger Nano app.
//!
//! Builds APDU commands for the app's operations (version, public key,
//! public address, transaction signing) and decodes the device responses
//! into typed results. The transport is injected through the
//! [`ledger_transport::Exchange`] trait; this crate never opens devices
//! itself.

#![deny(warnings, trivial_casts, trivial_numeric_casts)]
#![deny(unused_import_braces, unused_qualifications)]
#![deny(missing_docs)]

/// Re-export APDU-related types from the `ledger_transport` crate.
pub use ledger_transport::{APDUAnswer, APDUCommand, APDUErrorCode};
/// Re-export error handling utilities from the `ledger_zondax_generic` crate.
pub use ledger_zondax_generic::LedgerAppError;

mod app;
pub use app::*;

/// APDU class/instruction constants and fixed response sizes.
pub mod config;

/// Transaction parameters, validation and wire encoding.
pub mod txn;

/// Raw fixed-size response types.
pub mod types;
