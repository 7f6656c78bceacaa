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
//! Client for the Zilliqa Ledger app

use std::str;

use byteorder::{LittleEndian, WriteBytesExt};
use ledger_transport::{APDUCommand, APDUErrorCode, Exchange};
use ledger_zondax_generic::{App, LedgerAppError};

use crate::config::{
    BECH32_ADDR_LEN, CLA, INS_GET_PUBLIC_KEY, INS_GET_VERSION, INS_SIGN_TXN, KEY_INDEX_SIZE,
    P2_PUBLIC_ADDRESS, P2_PUBLIC_KEY, PK_LEN_SECP256K1, SIG_SIZE, VERSION_SIZE,
};
use crate::txn::ZilTxParams;
use crate::types::{PublicKeySecp256k1, SignatureRaw};

/// Ledger App
pub struct ZilliqaApp<E> {
    apdu_transport: E,
}

impl<E: Exchange> App for ZilliqaApp<E> {
    const CLA: u8 = CLA;
}

impl<E> ZilliqaApp<E> {
    /// Connect to the Ledger App
    pub const fn new(apdu_transport: E) -> Self {
        Self { apdu_transport }
    }
}

/// Zilliqa account address together with the public key it belongs to
pub struct AddressBech32 {
    /// Public Key
    pub public_key: PublicKeySecp256k1,
    /// Address (exposed as bech32)
    pub address: String,
}

impl<E> ZilliqaApp<E>
where
    E: Exchange,
    E::Error: std::error::Error,
{
    /// Retrieve the app version, formatted as `v{major}.{minor}.{patch}`.
    ///
    /// Each version byte travels as its decimal digit string reinterpreted
    /// as hexadecimal; the app firmware and the reference host driver agree
    /// on this mapping, so it is reproduced here verbatim.
    pub async fn get_version(&self) -> Result<String, LedgerAppError<E::Error>> {
        let command = APDUCommand {
            cla: Self::CLA,
            ins: INS_GET_VERSION,
            p1: 0x00,
            p2: 0x00,
            data: Vec::<u8>::new(),
        };

        let response = self.apdu_transport.exchange(&command).await?;
        match response.error_code() {
            Ok(APDUErrorCode::NoError) => {}
            Ok(err) => return Err(LedgerAppError::AppSpecific(err as _, err.description())),
            Err(err) => return Err(LedgerAppError::Unknown(err)),
        }

        let response_data = response.data();
        if response_data.len() < VERSION_SIZE {
            return Err(LedgerAppError::InvalidVersion);
        }

        let mut version = String::from("v");
        for (i, byte) in response_data[..VERSION_SIZE].iter().enumerate() {
            if i != 0 {
                version.push('.');
            }
            let field = u32::from_str_radix(&byte.to_string(), 16)
                .map_err(|_| LedgerAppError::InvalidVersion)?;
            version.push_str(&field.to_string());
        }

        log::info!("app version {}", version);

        Ok(version)
    }

    /// Retrieve the compressed public key for a key index
    pub async fn get_public_key(
        &self,
        index: u32,
    ) -> Result<PublicKeySecp256k1, LedgerAppError<E::Error>> {
        let mut payload = Vec::with_capacity(KEY_INDEX_SIZE);
        payload
            .write_u32::<LittleEndian>(index)
            .map_err(|_| LedgerAppError::AppSpecific(0, String::from("Invalid key index")))?;

        let command = APDUCommand {
            cla: Self::CLA,
            ins: INS_GET_PUBLIC_KEY,
            p1: 0x00,
            p2: P2_PUBLIC_KEY,
            data: payload,
        };

        let response = self.apdu_transport.exchange(&command).await?;
        match response.error_code() {
            Ok(APDUErrorCode::NoError) => {}
            Ok(err) => return Err(LedgerAppError::AppSpecific(err as _, err.description())),
            Err(err) => return Err(LedgerAppError::Unknown(err)),
        }

        let response_data = response.data();
        if response_data.len() < PK_LEN_SECP256K1 {
            return Err(LedgerAppError::InvalidPK);
        }

        log::info!("Received response {}", response_data.len());

        let mut public_key = [0u8; PK_LEN_SECP256K1];
        public_key.copy_from_slice(&response_data[..PK_LEN_SECP256K1]);

        Ok(public_key)
    }

    /// Retrieve the public key and its bech32 account address for a key
    /// index. The key occupies the first 33 response bytes, the address the
    /// 42 bytes after it.
    pub async fn get_public_address(
        &self,
        index: u32,
    ) -> Result<AddressBech32, LedgerAppError<E::Error>> {
        let mut payload = Vec::with_capacity(KEY_INDEX_SIZE);
        payload
            .write_u32::<LittleEndian>(index)
            .map_err(|_| LedgerAppError::AppSpecific(0, String::from("Invalid key index")))?;

        let command = APDUCommand {
            cla: Self::CLA,
            ins: INS_GET_PUBLIC_KEY,
            p1: 0x00,
            p2: P2_PUBLIC_ADDRESS,
            data: payload,
        };

        let response = self.apdu_transport.exchange(&command).await?;
        match response.error_code() {
            Ok(APDUErrorCode::NoError) => {}
            Ok(err) => return Err(LedgerAppError::AppSpecific(err as _, err.description())),
            Err(err) => return Err(LedgerAppError::Unknown(err)),
        }

        let response_data = response.data();
        if response_data.len() < PK_LEN_SECP256K1 + BECH32_ADDR_LEN {
            return Err(LedgerAppError::InvalidPK);
        }

        log::info!("Received response {}", response_data.len());

        let mut address = AddressBech32 {
            public_key: [0; PK_LEN_SECP256K1],
            address: "".to_string(),
        };

        address
            .public_key
            .copy_from_slice(&response_data[..PK_LEN_SECP256K1]);
        address.address =
            str::from_utf8(&response_data[PK_LEN_SECP256K1..PK_LEN_SECP256K1 + BECH32_ADDR_LEN])
                .map_err(|_e| LedgerAppError::Utf8)?
                .to_owned();

        Ok(address)
    }

    /// Sign a transaction with the key at `index`.
    ///
    /// The payload carries the key index, the length of the encoded
    /// transaction and the encoded transaction itself, all lengths
    /// little-endian. The device shows the transaction on screen and only
    /// returns the signature after on-device confirmation.
    pub async fn sign_txn(
        &self,
        index: u32,
        params: &ZilTxParams,
    ) -> Result<SignatureRaw, LedgerAppError<E::Error>> {
        let encoded_txn = params.to_proto_bytes();
        let txn_size =
            u32::try_from(encoded_txn.len()).map_err(|_| LedgerAppError::InvalidMessageSize)?;

        let mut payload = Vec::with_capacity(2 * KEY_INDEX_SIZE + encoded_txn.len());
        payload
            .write_u32::<LittleEndian>(index)
            .map_err(|_| LedgerAppError::AppSpecific(0, String::from("Invalid key index")))?;
        payload
            .write_u32::<LittleEndian>(txn_size)
            .map_err(|_| LedgerAppError::InvalidMessageSize)?;
        payload.extend_from_slice(&encoded_txn);

        log::info!("sending transaction to ledger");
        log::info!("{}", hex::encode(&encoded_txn));

        let command = APDUCommand {
            cla: Self::CLA,
            ins: INS_SIGN_TXN,
            p1: 0x00,
            p2: 0x00,
            data: payload,
        };

        let response = self.apdu_transport.exchange(&command).await?;
        match response.error_code() {
            Ok(APDUErrorCode::NoError) => {}
            Ok(err) => return Err(LedgerAppError::AppSpecific(err as _, err.description())),
            Err(err) => return Err(LedgerAppError::Unknown(err)),
        }

        let response_data = response.data();
        if response_data.len() < SIG_SIZE {
            return Err(LedgerAppError::InvalidSignature);
        }

        log::info!("Received response {}", response_data.len());

        let mut sig = [0u8; SIG_SIZE];
        sig.copy_from_slice(&response_data[..SIG_SIZE]);

        Ok(sig)
    }
}
