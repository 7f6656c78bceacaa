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
//! Tests against a physical device with the Zilliqa app open.
//! Run with `cargo test -- --ignored`.

use env_logger::Env;
use serial_test::serial;

use ledger_transport_hid::{hidapi::HidApi, TransportNativeHID};
use ledger_zilliqa::config::{BECH32_ADDR_LEN, PK_LEN_SECP256K1, SIG_SIZE};
use ledger_zilliqa::txn::{ZilAmount, ZilTxParams};
use ledger_zilliqa::ZilliqaApp;

lazy_static::lazy_static! {
    static ref HIDAPI: HidApi = HidApi::new().expect("Failed to create Hidapi");
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

#[tokio::test]
#[serial]
#[ignore = "requires a Ledger device with the Zilliqa app open"]
async fn version() {
    init_logging();

    log::info!("Test");

    let app = ZilliqaApp::new(TransportNativeHID::new(&HIDAPI).expect("Unable to create transport"));

    let version = app.get_version().await.unwrap();
    println!("version {}", version);

    assert!(version.starts_with('v'));
}

#[tokio::test]
#[serial]
#[ignore = "requires a Ledger device with the Zilliqa app open"]
async fn public_key() {
    init_logging();

    let app = ZilliqaApp::new(TransportNativeHID::new(&HIDAPI).expect("Unable to create transport"));

    let key = app.get_public_key(0).await.unwrap();
    println!("Public Key   {:?}", hex::encode(key));

    assert_eq!(key.len(), PK_LEN_SECP256K1);
}

#[tokio::test]
#[serial]
#[ignore = "requires a Ledger device with the Zilliqa app open"]
async fn public_address() {
    init_logging();

    let app = ZilliqaApp::new(TransportNativeHID::new(&HIDAPI).expect("Unable to create transport"));

    let resp = app.get_public_address(0).await.unwrap();
    println!("Public Key   {:?}", hex::encode(resp.public_key));
    println!("Address      {:?}", resp.address);

    assert_eq!(resp.address.len(), BECH32_ADDR_LEN);
    assert!(resp.address.starts_with("zil1"));

    // the key region is shared with the key-only operation
    let key = app.get_public_key(0).await.unwrap();
    assert_eq!(key, resp.public_key);
}

#[tokio::test]
#[serial]
#[ignore = "requires a Ledger device with the Zilliqa app open"]
async fn sign_txn() {
    init_logging();

    let app = ZilliqaApp::new(TransportNativeHID::new(&HIDAPI).expect("Unable to create transport"));

    let params = ZilTxParams {
        // testnet chain id 333, message version 1
        version: (333 << 16) | 1,
        nonce: 1,
        to_addr: "8ad0357ebb5515f694de597eda6f3f6bdbad0fd9".parse().unwrap(),
        amount: ZilAmount::from(1_000_000_000_000u64),
        gas_price: ZilAmount::from(2_000_000_000u64),
        gas_limit: 50,
        pub_key: None,
        code: None,
        data: None,
    };

    // requires confirmation on the device screen
    let sig = app.sign_txn(0, &params).await.unwrap();
    println!("Signature    {:?}", hex::encode(sig));

    assert_eq!(sig.len(), SIG_SIZE);
}
