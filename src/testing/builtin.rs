//! Built-in Ethereum JSON-RPC smoke scenario
//!
//! The request order is part of the contract: read-only calls, cheapest
//! first, ending with block and log queries against fixed mainnet heights.
//! It names no endpoint, so the configured one (`localhost:51515` by
//! default) is used.

use serde_json::json;

use super::config::{TestScenario, TestStep};

/// Name of the built-in scenario
pub const BUILTIN_SCENARIO: &str = "eth-smoke";

const BLOCK_HASH: &str = "0xd268bdabee5eab4914d0de9b0e0071364582cfb3c952b19727f1ab429f4ba2a8";
const BLOCK_NUMBER: &str = "0x41b57c";
const BLOCK_REQUEST_ID: u64 = 25388;

/// The fixed request list
pub fn eth_smoke() -> TestScenario {
    let steps = vec![
        TestStep::call("web3_clientVersion", json!([]), 1),
        TestStep::call("web3_sha3", json!(["0x00"]), 1),
        TestStep::call("net_listening", json!([]), 1),
        TestStep::call("net_peerCount", json!([]), 1),
        TestStep::call("net_version", json!([]), 1),
        TestStep::call("eth_blockNumber", json!([]), 1),
        TestStep::call("eth_chainId", json!([]), 1),
        TestStep::call("eth_protocolVersion", json!([]), 1),
        TestStep::call("eth_syncing", json!([]), 1),
        TestStep::call(
            "eth_getBlockByHash",
            json!([BLOCK_HASH, true]),
            BLOCK_REQUEST_ID,
        ),
        TestStep::call(
            "eth_getBlockByNumber",
            json!([BLOCK_NUMBER, true]),
            BLOCK_REQUEST_ID,
        ),
        TestStep::call(
            "eth_getBlockTransactionCountByNumber",
            json!([BLOCK_NUMBER]),
            1,
        ),
        TestStep::call(
            "eth_getLogs",
            json!([{
                "fromBlock": "0x3d0900",
                "toBlock": "0x3d0964",
                "address": "0x2a89f54a9f8e727a7be754fd055bb8ea93d0557d",
            }]),
            3,
        ),
    ];

    TestScenario {
        name: BUILTIN_SCENARIO.to_string(),
        description: Some("Read-only web3/net/eth calls against a local node".to_string()),
        endpoint: None,
        steps,
    }
}
