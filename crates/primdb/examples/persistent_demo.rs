//! Demonstrates PrimDB's persistent storage.
//!
//! Run with: cargo run -p primdb --example persistent_demo

use primdb::{render, AlwaysConfirm, Database};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = "./demo_database";

    println!("=== PrimDB Persistent Database Demo ===\n");

    // Clean up any previous demo data
    if Path::new(db_path).exists() {
        std::fs::remove_dir_all(db_path)?;
        println!("Cleaned up previous demo data\n");
    }

    println!("PART 1: Writing data...");
    {
        let mut db = Database::open(db_path)?;
        for command in [
            "create_table users name:str age:int admin:bool",
            "insert into users values (\"Alice\", 30, yes)",
            "insert into users values (\"Bob\", 25, no)",
        ] {
            println!("   > {}", command);
            println!("   {}", render(&db.execute(command, &mut AlwaysConfirm)));
        }
        // Database goes out of scope; everything is already on disk
    }

    println!("\nPART 2: Reopening...");
    let mut db = Database::open(db_path)?;
    for command in ["list_tables", "info users", "select from users where admin=true"] {
        println!("   > {}", command);
        println!("{}", render(&db.execute(command, &mut AlwaysConfirm)));
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
