#![no_main]

use friends::{parse_term, ResourceLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|depth: u8| {
    let depth = depth as usize;

    let mut term = String::from("かばんちゃん");
    for _ in 0..depth {
        term = format!("「{} と ボス」", term);
    }

    // Past the group limit this must be refused, never overflow the stack.
    let _ = parse_term(&term, &ResourceLimits::default());
});
