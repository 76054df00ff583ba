//! JSON rendering of ledger state.

use mines_ledger::{LedgerEvent, LedgerSnapshot};
use mines_types::{Address, TokenAmount};
use serde::Serialize;

/// Read-only view of a ledger: the external observables plus the snapshot
/// hash and, when available, the event journal.
#[derive(Debug, Serialize)]
pub struct LedgerReport {
    pub administrator: Address,
    pub total_supply: TokenAmount,
    pub snapshot_hash: String,
    pub accounts: Vec<AccountReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<LedgerEvent>,
}

#[derive(Debug, Serialize)]
pub struct AccountReport {
    pub address: Address,
    pub balance: TokenAmount,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowances: Vec<AllowanceReport>,
}

#[derive(Debug, Serialize)]
pub struct AllowanceReport {
    pub spender: Address,
    pub amount: TokenAmount,
}

impl LedgerReport {
    pub fn from_snapshot(snapshot: &LedgerSnapshot, events: Vec<LedgerEvent>) -> Self {
        Self {
            administrator: snapshot.administrator.clone(),
            total_supply: snapshot.total_supply,
            snapshot_hash: snapshot.hash_hex(),
            accounts: snapshot
                .accounts
                .iter()
                .map(|a| AccountReport {
                    address: a.address.clone(),
                    balance: a.balance,
                    allowances: a
                        .approvals
                        .iter()
                        .map(|(spender, amount)| AllowanceReport {
                            spender: spender.clone(),
                            amount: *amount,
                        })
                        .collect(),
                })
                .collect(),
            events,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mines_ledger::TokenLedger;

    #[test]
    fn report_lists_balances_and_allowances() {
        let admin = Address::new("admin");
        let alice = Address::new("alice");
        let mut ledger = TokenLedger::new(admin.clone());
        ledger.mint(&alice, TokenAmount::new(18), &admin).unwrap();
        ledger
            .approve(&Address::new("charlie"), TokenAmount::new(5), &alice)
            .unwrap();

        let report = LedgerReport::from_snapshot(&ledger.snapshot(), Vec::new());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["administrator"], "admin");
        assert_eq!(json["total_supply"], 18);
        assert_eq!(json["accounts"][0]["address"], "alice");
        assert_eq!(json["accounts"][0]["allowances"][0]["spender"], "charlie");
        assert_eq!(json["accounts"][0]["allowances"][0]["amount"], 5);
        assert!(json.get("events").is_none());
    }
}
