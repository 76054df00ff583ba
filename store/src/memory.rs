//! In-memory account store.

use std::collections::HashMap;

use mines_types::Address;

use crate::account::{Account, AccountStore};

/// `HashMap`-backed [`AccountStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryAccountStore {
    accounts: HashMap<Address, Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from pre-existing records (e.g. a restored snapshot).
    pub fn from_accounts(accounts: impl IntoIterator<Item = (Address, Account)>) -> Self {
        Self {
            accounts: accounts.into_iter().collect(),
        }
    }
}

impl AccountStore for MemoryAccountStore {
    fn get(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    fn get_mut(&mut self, address: &Address) -> Option<&mut Account> {
        self.accounts.get_mut(address)
    }

    fn get_or_create(&mut self, address: &Address) -> &mut Account {
        self.accounts.entry(address.clone()).or_default()
    }

    fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn iter_accounts(&self) -> Vec<(&Address, &Account)> {
        let mut all: Vec<_> = self.accounts.iter().collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }

    fn contains(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mines_types::TokenAmount;

    #[test]
    fn get_or_create_is_idempotent() {
        let mut store = MemoryAccountStore::new();
        let alice = Address::new("alice");
        let bob = Address::new("bob");

        store.get_or_create(&alice).balance = TokenAmount::new(18);
        store
            .get_or_create(&alice)
            .set_allowance(&bob, TokenAmount::new(3));

        let again = store.get_or_create(&alice);
        assert_eq!(again.balance, TokenAmount::new(18));
        assert_eq!(again.allowance(&bob), TokenAmount::new(3));
        assert_eq!(store.account_count(), 1);
    }

    #[test]
    fn get_does_not_create() {
        let store = MemoryAccountStore::new();
        assert!(store.get(&Address::new("ghost")).is_none());
        assert!(!store.contains(&Address::new("ghost")));
        assert_eq!(store.account_count(), 0);
    }

    #[test]
    fn iter_accounts_is_sorted_and_total_balance_sums() {
        let mut store = MemoryAccountStore::new();
        for (name, balance) in [("carol", 5), ("alice", 18), ("bob", 24)] {
            store.get_or_create(&Address::new(name)).balance = TokenAmount::new(balance);
        }

        let names: Vec<_> = store
            .iter_accounts()
            .into_iter()
            .map(|(addr, _)| addr.as_str().to_string())
            .collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
        assert_eq!(store.total_balance(), Some(TokenAmount::new(47)));
    }

    #[test]
    fn total_balance_reports_overflow() {
        let mut store = MemoryAccountStore::new();
        store.get_or_create(&Address::new("a")).balance = TokenAmount::MAX;
        store.get_or_create(&Address::new("b")).balance = TokenAmount::new(1);
        assert_eq!(store.total_balance(), None);
    }
}
