use proptest::prelude::*;

use mines_ledger::{Call, ErrorKind, TokenLedger};
use mines_types::{Address, TokenAmount};

const NAMES: [&str; 5] = ["admin", "alice", "bob", "charlie", "dave"];

fn address() -> impl Strategy<Value = Address> {
    (0..NAMES.len()).prop_map(|i| Address::new(NAMES[i]))
}

fn amount() -> impl Strategy<Value = TokenAmount> {
    prop_oneof![
        3 => (0u128..50).prop_map(TokenAmount::new),
        1 => (0u128..10_000).prop_map(TokenAmount::new),
    ]
}

fn call() -> impl Strategy<Value = Call> {
    prop_oneof![
        (address(), address(), amount()).prop_map(|(origin, destination, amount)| {
            Call::Transfer { origin, destination, amount }
        }),
        (address(), amount()).prop_map(|(spender, amount)| Call::Approve { spender, amount }),
        (address(), amount()).prop_map(|(address, amount)| Call::Mint { address, amount }),
        (address(), amount()).prop_map(|(address, amount)| Call::Burn { address, amount }),
    ]
}

proptest! {
    /// Supply equals the sum of balances after every call, committed or not,
    /// and a rejected call changes nothing.
    #[test]
    fn supply_is_conserved(steps in prop::collection::vec((call(), address()), 1..80)) {
        let mut ledger = TokenLedger::new(Address::new("admin"));
        for (call, caller) in &steps {
            let before = ledger.snapshot();
            let events_before = ledger.events().len();
            if ledger.apply(call, caller).is_err() {
                prop_assert_eq!(ledger.snapshot(), before);
                prop_assert_eq!(ledger.events().len(), events_before);
            }
            prop_assert!(ledger.check_invariants().is_ok());
        }
    }

    /// Only the recorded administrator can mint or burn.
    #[test]
    fn only_administrator_mints_and_burns(
        caller in address(),
        target in address(),
        value in amount(),
    ) {
        prop_assume!(caller.as_str() != "admin");
        let mut ledger = TokenLedger::new(Address::new("admin"));
        ledger.mint(&target, TokenAmount::new(100), &Address::new("admin")).unwrap();

        let mint = ledger.mint(&target, value, &caller).unwrap_err();
        prop_assert_eq!(mint.kind(), ErrorKind::Unauthorized);
        let burn = ledger.burn(&target, value, &caller).unwrap_err();
        prop_assert_eq!(burn.kind(), ErrorKind::Unauthorized);
        prop_assert_eq!(ledger.total_supply(), TokenAmount::new(100));
    }

    /// Two consecutive non-zero approvals always fail; zeroing first always works.
    #[test]
    fn approval_must_pass_through_zero(x in 1u128..1_000, y in 1u128..1_000) {
        let (alice, charlie) = (Address::new("alice"), Address::new("charlie"));
        let mut ledger = TokenLedger::new(Address::new("admin"));

        ledger.approve(&charlie, TokenAmount::new(x), &alice).unwrap();
        let err = ledger.approve(&charlie, TokenAmount::new(y), &alice).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidApproval);

        ledger.approve(&charlie, TokenAmount::ZERO, &alice).unwrap();
        ledger.approve(&charlie, TokenAmount::new(y), &alice).unwrap();
        prop_assert_eq!(ledger.allowance(&alice, &charlie), TokenAmount::new(y));
    }

    /// A delegated transfer never moves more than the allowance and reduces it
    /// by exactly the amount moved.
    #[test]
    fn delegated_transfer_bounded_by_allowance(
        balance in 0u128..1_000,
        allowance in 1u128..1_000,
        value in 0u128..1_000,
    ) {
        let admin = Address::new("admin");
        let (alice, bob, charlie) = (Address::new("alice"), Address::new("bob"), Address::new("charlie"));
        let mut ledger = TokenLedger::new(admin.clone());
        ledger.mint(&alice, TokenAmount::new(balance), &admin).unwrap();
        ledger.approve(&charlie, TokenAmount::new(allowance), &alice).unwrap();

        let result = ledger.transfer(&alice, &bob, TokenAmount::new(value), &charlie);
        if value <= balance && value <= allowance {
            prop_assert!(result.is_ok());
            prop_assert_eq!(ledger.allowance(&alice, &charlie).raw(), allowance - value);
            prop_assert_eq!(ledger.balance(&bob).raw(), value);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(ledger.allowance(&alice, &charlie).raw(), allowance);
            prop_assert_eq!(ledger.balance(&alice).raw(), balance);
        }
    }
}
