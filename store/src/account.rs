//! Account record and storage trait.

use std::collections::BTreeMap;

use mines_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

/// Per-address record held by the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Spendable token balance.
    pub balance: TokenAmount,
    /// Allowances granted by this account, keyed by spender.
    ///
    /// A zero allowance means "no approval"; entries are pruned when they
    /// reach zero.
    pub approvals: BTreeMap<Address, TokenAmount>,
}

impl Account {
    /// Allowance granted to `spender`, zero when none is recorded.
    pub fn allowance(&self, spender: &Address) -> TokenAmount {
        self.approvals.get(spender).copied().unwrap_or(TokenAmount::ZERO)
    }

    /// Set the allowance for `spender`, removing the entry when it is zero.
    pub fn set_allowance(&mut self, spender: &Address, amount: TokenAmount) {
        if amount.is_zero() {
            self.approvals.remove(spender);
        } else {
            self.approvals.insert(spender.clone(), amount);
        }
    }
}

/// Trait for account storage operations.
///
/// Implementations are exclusively owned by a single ledger; no interior
/// locking is expected.
pub trait AccountStore {
    fn get(&self, address: &Address) -> Option<&Account>;
    fn get_mut(&mut self, address: &Address) -> Option<&mut Account>;

    /// Return the record for `address`, creating an empty one on first
    /// reference. Never resets an existing record.
    fn get_or_create(&mut self, address: &Address) -> &mut Account;

    fn account_count(&self) -> usize;

    /// All records, sorted by address.
    fn iter_accounts(&self) -> Vec<(&Address, &Account)>;

    fn contains(&self, address: &Address) -> bool {
        self.get(address).is_some()
    }

    /// Sum of all balances, or `None` if it does not fit in a `TokenAmount`.
    fn total_balance(&self) -> Option<TokenAmount> {
        self.iter_accounts()
            .into_iter()
            .try_fold(TokenAmount::ZERO, |acc, (_, account)| acc.checked_add(account.balance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_allowance_is_pruned() {
        let spender = Address::new("charlie");
        let mut account = Account::default();

        account.set_allowance(&spender, TokenAmount::new(10));
        assert_eq!(account.allowance(&spender), TokenAmount::new(10));

        account.set_allowance(&spender, TokenAmount::ZERO);
        assert_eq!(account.allowance(&spender), TokenAmount::ZERO);
        assert!(account.approvals.is_empty());
    }

    #[test]
    fn missing_allowance_reads_as_zero() {
        let account = Account::default();
        assert!(account.allowance(&Address::new("nobody")).is_zero());
    }
}
