//! Canned workloads for demonstrations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{SlotEngine, TransactionRequest};
use crate::util::serde::{Priority, TxId};

/// A predefined batch of creation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// JIT DEX and ORACLE traffic plus two AOT DEX settlements.
    DexOracle,
    /// Thirty small high-priority HFT orders at once.
    HftBurst,
}

impl Scenario {
    /// Requests in submission order.
    pub fn requests(self) -> Vec<TransactionRequest> {
        match self {
            Self::DexOracle => {
                let dex = TransactionRequest::jit(4000, 15)
                    .with_priority(Priority::High)
                    .with_group("DEX");
                let oracle = TransactionRequest::jit(3000, 12)
                    .with_priority(Priority::Medium)
                    .with_group("ORACLE");
                let mut requests = vec![dex; 5];
                requests.extend(std::iter::repeat_n(oracle, 5));
                requests.push(
                    TransactionRequest::aot(6000, 20, 5)
                        .with_priority(Priority::High)
                        .with_group("DEX"),
                );
                requests.push(
                    TransactionRequest::aot(6000, 25, 10)
                        .with_priority(Priority::High)
                        .with_group("DEX"),
                );
                requests
            }
            Self::HftBurst => vec![
                TransactionRequest::jit(1000, 6)
                    .with_priority(Priority::High)
                    .with_group("HFT");
                30
            ],
        }
    }

    /// Submit every request to `engine`, returning the ids in order.
    pub fn run(self, engine: &mut SlotEngine) -> Vec<TxId> {
        tracing::info!("running scenario {:?}", self);
        self.requests()
            .iter()
            .map(|request| engine.create_transaction(request))
            .collect()
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "dex_oracle" => Ok(Self::DexOracle),
            "hft_burst" => Ok(Self::HftBurst),
            other => Err(format!("unknown scenario `{other}`")),
        }
    }
}
