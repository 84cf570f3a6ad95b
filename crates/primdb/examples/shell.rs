//! Interactive command shell.
//!
//! Run with: cargo run -p primdb --example shell -- [db_dir]
//!
//! Set `RUST_LOG=debug` to see cache and timing output.

use primdb::confirm::is_yes;
use primdb::logging::{LogConfig, LogFormat};
use primdb::{render, Database};
use std::io::{self, BufRead, Write};

fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = LogConfig::warn().with_format(LogFormat::Compact).init()?;

    let path = std::env::args().nth(1).unwrap_or_else(|| "./primdb_data".to_string());
    let mut db = Database::open(&path)?;
    println!("PrimDB {} at {}. Type 'help' for commands.", primdb::VERSION, path);

    let mut ask = |prompt: &str| -> bool {
        match read_line(prompt) {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    };

    while let Some(line) = read_line(">>> ")? {
        let line = line.trim();
        match line {
            "" => continue,
            "exit" => break,
            "help" => {
                println!("create_table <name> <col:type> ...  | drop_table <name> | list_tables");
                println!("insert into <name> values (<v1>, ...)");
                println!("select from <name> [where <col>=<value>]");
                println!("update <name> set <col>=<value>, ... where <col>=<value>");
                println!("delete from <name> where <col>=<value> | info <name> | exit");
            }
            command => println!("{}", render(&db.execute(command, &mut ask))),
        }
    }

    Ok(())
}
