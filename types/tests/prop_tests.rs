use proptest::prelude::*;

use mines_types::{Address, TokenAmount};

proptest! {
    /// checked_add agrees with u128 arithmetic and never wraps.
    #[test]
    fn amount_checked_add_matches_u128(a in any::<u128>(), b in any::<u128>()) {
        let sum = TokenAmount::new(a).checked_add(TokenAmount::new(b));
        prop_assert_eq!(sum.map(|s| s.raw()), a.checked_add(b));
    }

    /// checked_sub succeeds exactly when the result would be non-negative.
    #[test]
    fn amount_checked_sub_rejects_underflow(a in any::<u128>(), b in any::<u128>()) {
        let diff = TokenAmount::new(a).checked_sub(TokenAmount::new(b));
        prop_assert_eq!(diff.is_some(), a >= b);
    }

    /// Amount ordering follows the raw value.
    #[test]
    fn amount_ordering(a in any::<u128>(), b in any::<u128>()) {
        prop_assert_eq!(TokenAmount::new(a) <= TokenAmount::new(b), a <= b);
    }

    /// Amounts survive a bincode roundtrip as bare integers.
    #[test]
    fn amount_bincode_roundtrip(raw in any::<u128>()) {
        let encoded = bincode::serialize(&TokenAmount::new(raw)).unwrap();
        prop_assert_eq!(encoded, bincode::serialize(&raw).unwrap());
    }

    /// Any non-empty whitespace-free string is a valid address.
    #[test]
    fn address_parse_accepts_tokens(raw in "[a-zA-Z0-9_]{1,64}") {
        let addr = Address::parse(raw.clone()).unwrap();
        prop_assert_eq!(addr.as_str(), raw.as_str());
    }

    /// Strings containing whitespace are never valid addresses.
    #[test]
    fn address_parse_rejects_whitespace(left in "[a-z]{0,8}", right in "[a-z]{0,8}") {
        let raw = format!("{left} {right}");
        prop_assert!(Address::parse(raw).is_err());
    }
}
