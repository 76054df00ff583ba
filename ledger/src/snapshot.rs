//! Ledger snapshots — capture the full ledger state at a point between calls.
//!
//! The snapshot hash is computed deterministically from the administrator,
//! the total supply and every account record (sorted by address), so two
//! ledgers in the same state always produce the same hash.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use mines_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 over every other field.
    pub hash: [u8; 32],
    pub administrator: Address,
    pub total_supply: TokenAmount,
    /// Account records sorted by address.
    pub accounts: Vec<AccountSnapshot>,
    pub version: u32,
}

/// The state of a single account captured in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub address: Address,
    pub balance: TokenAmount,
    /// Non-zero allowances granted by this account, sorted by spender.
    pub approvals: Vec<(Address, TokenAmount)>,
}

impl LedgerSnapshot {
    pub fn create(
        administrator: Address,
        total_supply: TokenAmount,
        mut accounts: Vec<AccountSnapshot>,
    ) -> Self {
        accounts.sort_by(|a, b| a.address.cmp(&b.address));
        for account in &mut accounts {
            account.approvals.sort_by(|a, b| a.0.cmp(&b.0));
        }
        let mut snap = Self {
            hash: [0u8; 32],
            administrator,
            total_supply,
            accounts,
            version: SNAPSHOT_VERSION,
        };
        snap.hash = snap.compute_hash();
        snap
    }

    pub(crate) fn compute_hash(&self) -> [u8; 32] {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        update_address(&mut hasher, &self.administrator);
        hasher.update(self.total_supply.raw().to_le_bytes());
        hasher.update((self.accounts.len() as u64).to_le_bytes());
        for account in &self.accounts {
            update_address(&mut hasher, &account.address);
            hasher.update(account.balance.raw().to_le_bytes());
            hasher.update((account.approvals.len() as u64).to_le_bytes());
            for (spender, amount) in &account.approvals {
                update_address(&mut hasher, spender);
                hasher.update(amount.raw().to_le_bytes());
            }
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches its contents.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Deserialize a snapshot from bytes. The hash is not checked here; call
    /// [`verify`](Self::verify) or restore through
    /// [`TokenLedger::from_snapshot`](crate::TokenLedger::from_snapshot).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

// Length-prefixed so adjacent addresses cannot run together.
fn update_address(hasher: &mut Blake2b<U32>, address: &Address) {
    let bytes = address.as_str().as_bytes();
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
