//! `/contracts` endpoints of the node.

use crate::{serialize_body, Endpoint};
use reqwest::Method;
use serde::{Deserialize, Serialize};

pub mod multicall_contract {
    use super::*;

    /// A single read-only call of a deployed contract method, addressed by its index in the
    /// contract's method table.
    #[serde_with::skip_serializing_none]
    #[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct CallContract {
        pub group: i32,
        pub world_state_block_hash: Option<String>,
        pub tx_id: Option<String>,
        pub address: String,
        pub caller_address: Option<String>,
        pub method_index: i32,
    }

    impl CallContract {
        pub fn new(group: i32, address: impl Into<String>, method_index: i32) -> Self {
            Self {
                group,
                address: address.into(),
                method_index,
                ..Default::default()
            }
        }
    }

    #[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
    pub struct MultipleCallContract {
        pub calls: Vec<CallContract>,
    }

    /// Outcome of one call. The node reports either a success (returned values, gas, state
    /// changes) or a failure message, discriminated by the `type` field. The object is kept as
    /// returned so it can be serialized back unchanged.
    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    #[serde(transparent)]
    pub struct CallContractResult(pub serde_json::Map<String, serde_json::Value>);

    impl CallContractResult {
        /// The `type` discriminator, e.g. `CallContractSucceeded` or `CallContractFailed`.
        pub fn kind(&self) -> Option<&str> {
            self.0.get("type").and_then(|value| value.as_str())
        }
    }

    #[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
    pub struct MultipleCallContractResult {
        pub results: Vec<CallContractResult>,
    }

    pub struct MulticallContract {
        pub request: MultipleCallContract,
    }

    impl Endpoint for MulticallContract {
        type Response = MultipleCallContractResult;

        fn method(&self) -> Method {
            Method::POST
        }

        fn path(&self) -> String {
            "/contracts/multicall-contract".to_string()
        }

        fn body(&self) -> Option<String> {
            serialize_body(&self.request)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::multicall_contract::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn call_contract_omits_absent_fields() {
        let call = CallContract::new(0, "27HxXZJBTPjhHXwoF1Ue8sLMcSxYdxefoN2U6d8TKmZsm", 2);
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({
                "group": 0,
                "address": "27HxXZJBTPjhHXwoF1Ue8sLMcSxYdxefoN2U6d8TKmZsm",
                "methodIndex": 2
            })
        );

        let call = CallContract {
            world_state_block_hash: Some("00ff".to_string()),
            ..call
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap()["worldStateBlockHash"],
            json!("00ff")
        );
    }

    #[test]
    fn results_are_kept_as_returned() {
        let raw = json!({
            "results": [
                {
                    "type": "CallContractSucceeded",
                    "returns": [{ "type": "ByteVec", "value": "414c5048" }],
                    "gasUsed": 5000,
                    "contracts": [],
                    "txInputs": [],
                    "txOutputs": [],
                    "events": [],
                    "debugMessages": []
                },
                { "type": "CallContractFailed", "error": "VM execution error: InvalidMethodIndex" }
            ]
        });
        let result: MultipleCallContractResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.results[0].kind(), Some("CallContractSucceeded"));
        assert_eq!(result.results[1].kind(), Some("CallContractFailed"));
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }
}
