//! Core ledger engine: the four entrypoints and invariant enforcement.

use mines_store::{Account, AccountStore, MemoryAccountStore};
use mines_types::{Address, TokenAmount};
use tracing::{debug, warn};

use crate::auth;
use crate::call::Call;
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::snapshot::{AccountSnapshot, LedgerSnapshot, SNAPSHOT_VERSION};

/// The token ledger. Owns every account record and the total supply.
///
/// All mutation goes through [`transfer`](Self::transfer),
/// [`approve`](Self::approve), [`mint`](Self::mint) and [`burn`](Self::burn).
/// Each one checks every precondition first and only then mutates, so an
/// `Err` return means no field of the ledger changed.
#[derive(Debug)]
pub struct TokenLedger<S: AccountStore = MemoryAccountStore> {
    accounts: S,
    administrator: Address,
    total_supply: TokenAmount,
    /// Unbounded; hosts keeping a ledger alive indefinitely must call
    /// [`drain_events`](Self::drain_events) periodically.
    events: Vec<LedgerEvent>,
}

impl TokenLedger<MemoryAccountStore> {
    /// Create an empty ledger with a fixed administrator and zero supply.
    pub fn new(administrator: Address) -> Self {
        Self {
            accounts: MemoryAccountStore::new(),
            administrator,
            total_supply: TokenAmount::ZERO,
            events: Vec::new(),
        }
    }

    /// Rebuild a ledger from a snapshot, rejecting tampered or inconsistent
    /// snapshots.
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Result<Self, LedgerError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(LedgerError::Snapshot(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        if !snapshot.verify() {
            return Err(LedgerError::Snapshot("hash mismatch".into()));
        }
        if snapshot
            .accounts
            .windows(2)
            .any(|pair| pair[0].address >= pair[1].address)
        {
            return Err(LedgerError::Snapshot(
                "accounts are not strictly sorted by address".into(),
            ));
        }
        if snapshot
            .accounts
            .iter()
            .any(|a| a.approvals.windows(2).any(|pair| pair[0].0 >= pair[1].0))
        {
            return Err(LedgerError::Snapshot(
                "approvals are not strictly sorted by spender".into(),
            ));
        }
        let store = MemoryAccountStore::from_accounts(snapshot.accounts.iter().map(|a| {
            let account = Account {
                balance: a.balance,
                approvals: a
                    .approvals
                    .iter()
                    .filter(|(_, amount)| !amount.is_zero())
                    .cloned()
                    .collect(),
            };
            (a.address.clone(), account)
        }));
        let ledger = Self::with_store(snapshot.administrator.clone(), store)?;
        if ledger.total_supply != snapshot.total_supply {
            return Err(LedgerError::InvariantViolation {
                total_supply: snapshot.total_supply,
                balances: Some(ledger.total_supply),
            });
        }
        Ok(ledger)
    }
}

impl<S: AccountStore> TokenLedger<S> {
    /// Create a ledger over an existing store. The total supply is derived
    /// from the stored balances.
    pub fn with_store(administrator: Address, accounts: S) -> Result<Self, LedgerError> {
        let total_supply = accounts
            .total_balance()
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(Self {
            accounts,
            administrator,
            total_supply,
            events: Vec::new(),
        })
    }

    // ── Views ────────────────────────────────────────────────────────────

    pub fn administrator(&self) -> &Address {
        &self.administrator
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    /// Balance of `address`; zero for an address never referenced.
    pub fn balance(&self, address: &Address) -> TokenAmount {
        self.accounts
            .get(address)
            .map_or(TokenAmount::ZERO, |a| a.balance)
    }

    /// Allowance `owner` has granted to `spender`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount {
        self.accounts
            .get(owner)
            .map_or(TokenAmount::ZERO, |a| a.allowance(spender))
    }

    pub fn account_exists(&self, address: &Address) -> bool {
        self.accounts.contains(address)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.account_count()
    }

    pub fn store(&self) -> &S {
        &self.accounts
    }

    /// Events for every committed call since the last
    /// [`drain_events`](Self::drain_events), oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the journal empty.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recompute the sum of balances and compare it with the total supply.
    pub fn check_invariants(&self) -> Result<(), LedgerError> {
        let balances = self.accounts.total_balance();
        if balances == Some(self.total_supply) {
            Ok(())
        } else {
            Err(LedgerError::InvariantViolation {
                total_supply: self.total_supply,
                balances,
            })
        }
    }

    // ── Entrypoints ──────────────────────────────────────────────────────

    /// Dispatch a [`Call`] on behalf of `caller`.
    pub fn apply(&mut self, call: &Call, caller: &Address) -> Result<(), LedgerError> {
        match call {
            Call::Transfer {
                origin,
                destination,
                amount,
            } => self.transfer(origin, destination, *amount, caller),
            Call::Approve { spender, amount } => self.approve(spender, *amount, caller),
            Call::Mint { address, amount } => self.mint(address, *amount, caller),
            Call::Burn { address, amount } => self.burn(address, *amount, caller),
        }
    }

    /// Move `amount` from `origin` to `destination`.
    ///
    /// `caller` must be `origin` or hold a sufficient allowance from it; a
    /// delegated transfer consumes that allowance. The balance is checked
    /// before authorization, so a call failing both reports
    /// `InsufficientBalance`.
    pub fn transfer(
        &mut self,
        origin: &Address,
        destination: &Address,
        amount: TokenAmount,
        caller: &Address,
    ) -> Result<(), LedgerError> {
        let available = self.balance(origin);
        if available < amount {
            return Err(rejected(
                "transfer",
                caller,
                LedgerError::InsufficientBalance {
                    needed: amount,
                    available,
                },
            ));
        }
        if !auth::is_owner_or_approved(&*self, origin, caller, amount) {
            return Err(rejected(
                "transfer",
                caller,
                LedgerError::Unauthorized {
                    caller: caller.clone(),
                },
            ));
        }

        let remaining_allowance = if caller != origin {
            Some(self.allowance(origin, caller).saturating_sub(amount))
        } else {
            None
        };
        let credited = if origin == destination {
            available
        } else {
            match self.balance(destination).checked_add(amount) {
                Some(credited) => credited,
                None => {
                    return Err(rejected("transfer", caller, LedgerError::ArithmeticOverflow))
                }
            }
        };

        self.ensure_account(destination).balance = credited;
        // An absent origin can only reach here as a zero-amount owner transfer.
        if let Some(account) = self.accounts.get_mut(origin) {
            if origin != destination {
                account.balance = available.saturating_sub(amount);
            }
            if let Some(remaining) = remaining_allowance {
                account.set_allowance(caller, remaining);
            }
        }

        debug!(%origin, %destination, amount = amount.raw(), %caller, "transfer committed");
        self.events.push(LedgerEvent::Transfer {
            origin: origin.clone(),
            destination: destination.clone(),
            amount,
            spender: remaining_allowance.map(|_| caller.clone()),
        });
        Ok(())
    }

    /// Set the allowance `caller` grants to `spender`.
    ///
    /// A non-zero allowance can only be set over a zero one; changing a live
    /// allowance requires resetting it to zero first.
    ///
    /// Allowances live on the owner's record, so the caller's record is
    /// created on its first approval, including a zero one.
    pub fn approve(
        &mut self,
        spender: &Address,
        amount: TokenAmount,
        caller: &Address,
    ) -> Result<(), LedgerError> {
        let current = self.allowance(caller, spender);
        if !current.is_zero() && !amount.is_zero() {
            return Err(rejected(
                "approve",
                caller,
                LedgerError::InvalidApproval {
                    spender: spender.clone(),
                    current,
                    requested: amount,
                },
            ));
        }

        self.ensure_account(caller).set_allowance(spender, amount);

        debug!(owner = %caller, %spender, amount = amount.raw(), "approval committed");
        self.events.push(LedgerEvent::Approval {
            owner: caller.clone(),
            spender: spender.clone(),
            amount,
        });
        Ok(())
    }

    /// Create `amount` new tokens in `address`. Administrator only.
    pub fn mint(
        &mut self,
        address: &Address,
        amount: TokenAmount,
        caller: &Address,
    ) -> Result<(), LedgerError> {
        if !auth::is_administrator(&*self, caller) {
            return Err(rejected(
                "mint",
                caller,
                LedgerError::Unauthorized {
                    caller: caller.clone(),
                },
            ));
        }
        let (Some(total_supply), Some(balance)) = (
            self.total_supply.checked_add(amount),
            self.balance(address).checked_add(amount),
        ) else {
            return Err(rejected("mint", caller, LedgerError::ArithmeticOverflow));
        };

        self.ensure_account(address).balance = balance;
        self.total_supply = total_supply;

        debug!(%address, amount = amount.raw(), total_supply = total_supply.raw(), "mint committed");
        self.events.push(LedgerEvent::Mint {
            address: address.clone(),
            amount,
        });
        Ok(())
    }

    /// Destroy `amount` tokens held by `address`. Administrator only.
    pub fn burn(
        &mut self,
        address: &Address,
        amount: TokenAmount,
        caller: &Address,
    ) -> Result<(), LedgerError> {
        if !auth::is_administrator(&*self, caller) {
            return Err(rejected(
                "burn",
                caller,
                LedgerError::Unauthorized {
                    caller: caller.clone(),
                },
            ));
        }
        let available = self.balance(address);
        let Some(balance) = available.checked_sub(amount) else {
            return Err(rejected(
                "burn",
                caller,
                LedgerError::InsufficientBalance {
                    needed: amount,
                    available,
                },
            ));
        };
        let Some(total_supply) = self.total_supply.checked_sub(amount) else {
            let err = LedgerError::InvariantViolation {
                total_supply: self.total_supply,
                balances: self.accounts.total_balance(),
            };
            return Err(rejected("burn", caller, err));
        };

        self.ensure_account(address).balance = balance;
        self.total_supply = total_supply;

        debug!(%address, amount = amount.raw(), total_supply = total_supply.raw(), "burn committed");
        self.events.push(LedgerEvent::Burn {
            address: address.clone(),
            amount,
        });
        Ok(())
    }

    // ── Snapshots ────────────────────────────────────────────────────────

    /// Capture the administrator, supply and every account record.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let accounts = self
            .accounts
            .iter_accounts()
            .into_iter()
            .map(|(address, account)| AccountSnapshot {
                address: address.clone(),
                balance: account.balance,
                approvals: account
                    .approvals
                    .iter()
                    .map(|(spender, amount)| (spender.clone(), *amount))
                    .collect(),
            })
            .collect();
        LedgerSnapshot::create(self.administrator.clone(), self.total_supply, accounts)
    }

    // ── Internals ────────────────────────────────────────────────────────

    /// Return the record for `address`, creating it on first reference.
    fn ensure_account(&mut self, address: &Address) -> &mut Account {
        if !self.accounts.contains(address) {
            debug!(%address, "account created");
            self.events.push(LedgerEvent::AccountCreated {
                address: address.clone(),
            });
        }
        self.accounts.get_or_create(address)
    }
}

fn rejected(entrypoint: &'static str, caller: &Address, err: LedgerError) -> LedgerError {
    warn!(entrypoint, %caller, kind = %err.kind(), "call rejected: {err}");
    err
}
