#![no_main]

use libfuzzer_sys::fuzz_target;
use primdb_core::query::{parse_assignments, parse_filter};
use primdb_core::row::Row;
use primdb_core::value::Value;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if text.len() > 10_000 {
            return;
        }

        let mut row = Row::from_pairs([("ID", Value::Integer(1)), ("name", Value::from(text))]);
        if let Ok(Some(filter)) = parse_filter(text) {
            let _ = filter.matches(&row);
        }
        if let Ok(assignments) = parse_assignments(text) {
            let columns = row.len();
            assignments.apply(&mut row);
            // Assignments never add columns
            assert_eq!(row.len(), columns);
        }
    }
});
