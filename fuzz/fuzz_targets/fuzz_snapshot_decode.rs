#![no_main]

use libfuzzer_sys::fuzz_target;

use mines_ledger::{LedgerSnapshot, TokenLedger};

fuzz_target!(|data: &[u8]| {
    // Decoding and restoring arbitrary bytes must fail cleanly, never panic.
    if let Ok(snapshot) = LedgerSnapshot::from_bytes(data) {
        if let Ok(ledger) = TokenLedger::from_snapshot(&snapshot) {
            assert!(ledger.check_invariants().is_ok());
        }
    }
});
