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

use crate::config::{PK_LEN_SECP256K1, SIG_SIZE};

/// Compressed secp256k1 public key, as returned by the device
pub type PublicKeySecp256k1 = [u8; PK_LEN_SECP256K1];

/// Compact Schnorr signature, as returned by the device
pub type SignatureRaw = [u8; SIG_SIZE];
