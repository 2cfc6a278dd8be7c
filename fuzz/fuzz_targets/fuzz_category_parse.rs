#![no_main]
#![forbid(unsafe_code)]
use deskmate::knowledge::{Category, KnowledgeBase};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Category::parse(s);
        // Lookup must never panic, whatever the tag
        let kb = KnowledgeBase::builtin();
        let _ = kb.lookup(s);
    }
});
