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
//! Transaction parameters and their `ProtoTransactionCoreInfo` wire encoding

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::types::PublicKeySecp256k1;

/// Raw byte length of a Zilliqa account address (ByStr20)
pub const ADDR_LEN: usize = 20;

/// Wire length of an amount field: 16 big-endian bytes
pub const AMOUNT_WIRE_LEN: usize = 16;

/// Errors raised while validating or normalizing transaction parameters.
/// These are caller-contract violations, detected before any device
/// exchange takes place.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TxnError {
    /// A required field was absent at the untyped boundary
    #[error("txParams {0} is required!")]
    MissingField(&'static str),
    /// The destination address was not 20 bytes of hex
    #[error("invalid toAddr: {0}")]
    InvalidAddress(String),
    /// An amount field was not a decimal unsigned integer
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// The sender public key was not 33 bytes of hex
    #[error("invalid senderPubKey")]
    InvalidPubKey,
}

/// An unsigned Zilliqa quantity (Qa), wire-encoded as 16 big-endian bytes.
///
/// Construction is idempotent: normalizing an already-normalized amount is
/// a no-op and encodes byte-identically to normalizing the raw number or
/// decimal string it came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZilAmount(u128);

impl ZilAmount {
    /// The raw quantity in Qa
    pub const fn value(self) -> u128 {
        self.0
    }

    /// Big-endian wire representation, fixed at 16 bytes
    pub const fn to_be_bytes(self) -> [u8; AMOUNT_WIRE_LEN] {
        self.0.to_be_bytes()
    }
}

impl From<u128> for ZilAmount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for ZilAmount {
    fn from(value: u64) -> Self {
        Self(u128::from(value))
    }
}

impl FromStr for ZilAmount {
    type Err = TxnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| TxnError::InvalidAmount(s.to_string()))
    }
}

impl fmt::Display for ZilAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for ZilAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = ZilAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or unsigned integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ZilAmount::from(v))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
                Ok(ZilAmount::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// A raw 20-byte Zilliqa account address (ByStr20)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZilAddress([u8; ADDR_LEN]);

impl ZilAddress {
    /// Raw address bytes
    pub const fn as_bytes(&self) -> &[u8; ADDR_LEN] {
        &self.0
    }
}

impl From<[u8; ADDR_LEN]> for ZilAddress {
    fn from(raw: [u8; ADDR_LEN]) -> Self {
        Self(raw)
    }
}

impl FromStr for ZilAddress {
    type Err = TxnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex_str).map_err(|_| TxnError::InvalidAddress(s.to_string()))?;
        let raw: [u8; ADDR_LEN] = bytes
            .try_into()
            .map_err(|_| TxnError::InvalidAddress(s.to_string()))?;
        Ok(Self(raw))
    }
}

impl fmt::Display for ZilAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Core transaction fields, typed so that the required ones cannot be
/// absent. Values arriving from untyped boundaries (deserialized JSON) go
/// through [`RawTxParams::into_params`] first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZilTxParams {
    /// Chain id and message version, packed as upper/lower 16 bits
    pub version: u32,
    /// Account nonce of the sender
    pub nonce: u64,
    /// Destination account
    pub to_addr: ZilAddress,
    /// Amount to transfer, in Qa
    pub amount: ZilAmount,
    /// Gas price, in Qa
    pub gas_price: ZilAmount,
    /// Gas limit
    pub gas_limit: u64,
    /// Compressed public key of the sender, when known
    pub pub_key: Option<PublicKeySecp256k1>,
    /// Scilla contract code, for deployments
    pub code: Option<String>,
    /// Smart contract call data, JSON-encoded
    pub data: Option<String>,
}

/// Transaction parameters as they arrive from an untyped boundary, every
/// field optional. Amounts and the gas limit are accepted either as JSON
/// strings or as integers, matching what Zilliqa tooling emits.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTxParams {
    /// Chain id and message version
    #[serde(default)]
    pub version: Option<u32>,
    /// Account nonce of the sender
    #[serde(default)]
    pub nonce: Option<u64>,
    /// Destination account, hex with or without `0x`
    #[serde(default)]
    pub to_addr: Option<String>,
    /// Amount to transfer, in Qa
    #[serde(default)]
    pub amount: Option<ZilAmount>,
    /// Gas price, in Qa
    #[serde(default)]
    pub gas_price: Option<ZilAmount>,
    /// Gas limit
    #[serde(default, deserialize_with = "u64_from_str_or_int")]
    pub gas_limit: Option<u64>,
    /// Compressed public key of the sender, hex
    #[serde(default)]
    pub pub_key: Option<String>,
    /// Scilla contract code
    #[serde(default)]
    pub code: Option<String>,
    /// Smart contract call data
    #[serde(default)]
    pub data: Option<String>,
}

fn u64_from_str_or_int<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct U64Visitor;

    impl<'de> de::Visitor<'de> for U64Visitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal string or unsigned integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse().map(Some).map_err(E::custom)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(U64Visitor)
        }
    }

    deserializer.deserialize_option(U64Visitor)
}

impl RawTxParams {
    /// Check that every required field is present and produce the typed
    /// parameter set. Fails with the first missing field.
    pub fn into_params(self) -> Result<ZilTxParams, TxnError> {
        let version = self.version.ok_or(TxnError::MissingField("version"))?;
        let nonce = self.nonce.ok_or(TxnError::MissingField("nonce"))?;
        let to_addr = self
            .to_addr
            .ok_or(TxnError::MissingField("toAddr"))?
            .parse()?;
        let amount = self.amount.ok_or(TxnError::MissingField("amount"))?;
        let gas_price = self.gas_price.ok_or(TxnError::MissingField("gasPrice"))?;
        let gas_limit = self.gas_limit.ok_or(TxnError::MissingField("gasLimit"))?;

        let pub_key = match self.pub_key {
            Some(ref s) => {
                let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))
                    .map_err(|_| TxnError::InvalidPubKey)?;
                let raw: PublicKeySecp256k1 =
                    bytes.try_into().map_err(|_| TxnError::InvalidPubKey)?;
                Some(raw)
            }
            None => None,
        };

        Ok(ZilTxParams {
            version,
            nonce,
            to_addr,
            amount,
            gas_price,
            gas_limit,
            pub_key,
            code: self.code,
            data: self.data,
        })
    }
}

impl TryFrom<RawTxParams> for ZilTxParams {
    type Error = TxnError;

    fn try_from(raw: RawTxParams) -> Result<Self, Self::Error> {
        raw.into_params()
    }
}

const WIRE_VARINT: u64 = 0;
const WIRE_LEN_DELIMITED: u64 = 2;

fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

fn write_tag(buf: &mut Vec<u8>, field: u64, wire_type: u64) {
    write_varint(buf, field << 3 | wire_type);
}

fn write_uint(buf: &mut Vec<u8>, field: u64, value: u64) {
    write_tag(buf, field, WIRE_VARINT);
    write_varint(buf, value);
}

fn write_bytes(buf: &mut Vec<u8>, field: u64, data: &[u8]) {
    write_tag(buf, field, WIRE_LEN_DELIMITED);
    write_varint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

// nested ByteArray { bytes data = 1; }
fn write_byte_array(buf: &mut Vec<u8>, field: u64, data: &[u8]) {
    let mut inner = Vec::with_capacity(data.len() + 2);
    write_bytes(&mut inner, 1, data);
    write_bytes(buf, field, &inner);
}

impl ZilTxParams {
    /// Serialize into the `ProtoTransactionCoreInfo` wire format the device
    /// expects. Required fields are always written, `code` and `data` only
    /// when present and non-empty.
    pub fn to_proto_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128);

        write_uint(&mut buf, 1, u64::from(self.version));
        write_uint(&mut buf, 2, self.nonce);
        write_bytes(&mut buf, 3, self.to_addr.as_bytes());

        // senderpubkey is always present on the wire; a single zero byte
        // stands in when the key is not known yet
        match self.pub_key {
            Some(ref pk) => write_byte_array(&mut buf, 4, pk),
            None => write_byte_array(&mut buf, 4, &[0x00]),
        }

        write_byte_array(&mut buf, 5, &self.amount.to_be_bytes());
        write_byte_array(&mut buf, 6, &self.gas_price.to_be_bytes());
        write_uint(&mut buf, 7, self.gas_limit);

        if let Some(ref code) = self.code {
            if !code.is_empty() {
                write_bytes(&mut buf, 8, code.as_bytes());
            }
        }
        if let Some(ref data) = self.data {
            if !data.is_empty() {
                write_bytes(&mut buf, 9, data.as_bytes());
            }
        }

        buf
    }
}
