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

/// Application Identifier for Zilliqa commands
pub const CLA: u8 = 0xe0;

/// Instruction to get the app version
pub const INS_GET_VERSION: u8 = 0x01;
/// Instruction to get a public key or address (selected via P2)
pub const INS_GET_PUBLIC_KEY: u8 = 0x02;
/// Instruction to sign a raw hash. Reserved by the app, not exposed here.
pub const INS_SIGN_HASH: u8 = 0x04;
/// Instruction to sign a transaction
pub const INS_SIGN_TXN: u8 = 0x08;

/// P2 value selecting the public key only
pub const P2_PUBLIC_KEY: u8 = 0x00;
/// P2 value selecting public key plus bech32 address
pub const P2_PUBLIC_ADDRESS: u8 = 0x01;

/// Number of version bytes in a get-version response
pub const VERSION_SIZE: usize = 3;

/// Public Key Length (secp256k1, compressed)
pub const PK_LEN_SECP256K1: usize = 33;

/// Signature size (Schnorr, compact)
pub const SIG_SIZE: usize = 64;

/// Length of a bech32-encoded Zilliqa address:
/// "zil" + separator + 32 data chars + 6 checksum chars
pub const BECH32_ADDR_LEN: usize = 3 + 1 + 32 + 6;

/// Size of the little-endian key index in command payloads
pub const KEY_INDEX_SIZE: usize = 4;
