#![no_main]

use friends::{split_paragraphs, Reply, SearchBudget, Session};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut session = Session::new();
        for paragraph in split_paragraphs(s) {
            if let Ok(Reply::Solutions(mut solutions)) = session.input(&paragraph.text) {
                let mut budget = SearchBudget::new(10_000, 100);
                while let Ok(Some(_)) = solutions.next_within(&mut budget) {}
            }
        }
    }
});
