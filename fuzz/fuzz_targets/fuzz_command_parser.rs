#![no_main]

use libfuzzer_sys::fuzz_target;
use primdb_core::query::Parser;

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 strings
    if let Ok(command) = std::str::from_utf8(data) {
        // Limit input size to prevent timeout
        if command.len() <= 10_000 {
            // Parser should never panic, only return errors
            let _ = Parser::new(command).parse();
        }
    }
});
