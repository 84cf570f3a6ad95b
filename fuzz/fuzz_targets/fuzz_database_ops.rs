#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use primdb::{parse_assignments, parse_filter, AlwaysConfirm, Database};

#[derive(Arbitrary, Debug)]
enum DbOp {
    Insert { name: String, age: String },
    Select { filter: String },
    Update { set: String, filter: String },
    Delete { filter: String },
    Command { text: String },
}

fuzz_target!(|ops: Vec<DbOp>| {
    // In-memory database for fast fuzzing
    let mut db = Database::in_memory();
    if db.create_table("users", &["name:str", "age:int"]).is_err() {
        return;
    }

    for op in ops.iter().take(100) {
        // Limit operations to prevent timeout
        match op {
            DbOp::Insert { name, age } => {
                let _ = db.insert("users", &[name.as_str(), age.as_str()]);
            }
            DbOp::Select { filter } => {
                if let Ok(filter) = parse_filter(filter) {
                    let _ = db.select("users", filter.as_ref());
                }
            }
            DbOp::Update { set, filter } => {
                if let (Ok(assignments), Ok(Some(filter))) =
                    (parse_assignments(set), parse_filter(filter))
                {
                    let _ = db.update("users", &assignments, &filter);
                }
            }
            DbOp::Delete { filter } => {
                if let Ok(Some(filter)) = parse_filter(filter) {
                    let _ = db.delete("users", &filter);
                }
            }
            DbOp::Command { text } => {
                if text.len() <= 1024 {
                    let _ = db.execute(text, &mut AlwaysConfirm);
                }
            }
        }
    }
});
