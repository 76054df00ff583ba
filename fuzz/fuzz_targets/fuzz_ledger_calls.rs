#![no_main]

use libfuzzer_sys::fuzz_target;

use mines_ledger::{Call, TokenLedger};
use mines_types::{Address, TokenAmount};

const NAMES: [&str; 4] = ["admin", "alice", "bob", "charlie"];

fn address(byte: u8) -> Address {
    Address::new(NAMES[byte as usize % NAMES.len()])
}

// Each 12-byte chunk is one call: op, caller, two address selectors and a
// little-endian u64 amount. Supply must match the balances after every call.
fuzz_target!(|data: &[u8]| {
    let mut ledger = TokenLedger::new(Address::new("admin"));

    for chunk in data.chunks_exact(12) {
        let amount = TokenAmount::new(u64::from_le_bytes([
            chunk[4], chunk[5], chunk[6], chunk[7],
            chunk[8], chunk[9], chunk[10], chunk[11],
        ]) as u128);
        let call = match chunk[0] % 4 {
            0 => Call::Transfer { origin: address(chunk[2]), destination: address(chunk[3]), amount },
            1 => Call::Approve { spender: address(chunk[2]), amount },
            2 => Call::Mint { address: address(chunk[2]), amount },
            _ => Call::Burn { address: address(chunk[2]), amount },
        };

        let before = ledger.snapshot();
        if ledger.apply(&call, &address(chunk[1])).is_err() {
            assert_eq!(ledger.snapshot(), before);
        }
        assert!(ledger.check_invariants().is_ok());
    }
});
