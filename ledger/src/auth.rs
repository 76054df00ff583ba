//! Authorization predicates. Pure: nothing here mutates the ledger.

use mines_store::AccountStore;
use mines_types::{Address, TokenAmount};

use crate::engine::TokenLedger;

/// Whether `caller` is the administrator recorded at construction.
pub fn is_administrator<S: AccountStore>(ledger: &TokenLedger<S>, caller: &Address) -> bool {
    ledger.administrator() == caller
}

/// Whether `caller` may move `amount` out of `owner`'s balance.
///
/// True for the owner itself, or for a spender holding a non-zero allowance
/// from `owner` of at least `amount`.
pub fn is_owner_or_approved<S: AccountStore>(
    ledger: &TokenLedger<S>,
    owner: &Address,
    caller: &Address,
    amount: TokenAmount,
) -> bool {
    if caller == owner {
        return true;
    }
    let allowance = ledger.allowance(owner, caller);
    !allowance.is_zero() && allowance >= amount
}
