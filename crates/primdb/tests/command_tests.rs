mod common;

use common::{run, users_db};
use primdb::output::{CANCELLED, NO_RECORDS};
use primdb::{render, AlwaysConfirm, Database, Error, Output, Value};

#[test]
fn test_command_session() {
    let mut db = Database::in_memory();

    assert_eq!(render(&run(&mut db, "list_tables")), "No tables created.");
    assert_eq!(
        render(&run(&mut db, "create_table users name:str age:int")),
        "Table \"users\" created with columns: ID:int, name:str, age:int"
    );
    assert_eq!(
        render(&run(&mut db, "insert into users values (\"Alice\", 30)")),
        "Record with ID=1 added to table \"users\"."
    );
    assert_eq!(
        render(&run(&mut db, "select from users where age=30")),
        "{ID: 1, name: \"Alice\", age: 30}"
    );
    assert_eq!(
        render(&run(&mut db, "update users set age=31 where ID=1")),
        "Updated 1 record(s) in table \"users\"."
    );
    assert_eq!(
        render(&run(&mut db, "info users")),
        "Table: users\nColumns: ID:int, name:str, age:int\nRecord count: 1"
    );
    assert_eq!(
        render(&run(&mut db, "delete from users where ID=1")),
        "Deleted 1 record(s) from table \"users\"."
    );
    assert_eq!(render(&run(&mut db, "select from users")), NO_RECORDS);
    assert_eq!(render(&run(&mut db, "drop_table users")), "Table \"users\" dropped");
}

#[test]
fn test_keywords_are_case_insensitive() {
    let mut db = users_db();
    run(&mut db, "INSERT INTO users VALUES ('Bob', 25)").unwrap();
    let out = run(&mut db, "SELECT FROM users WHERE name=Bob").unwrap();
    assert_eq!(out.rows().map(<[_]>::len), Some(1));
}

#[test]
fn test_quoted_where_is_not_a_keyword() {
    let mut db = users_db();
    run(&mut db, "insert into users values (\"Ann\", 40)").unwrap();
    run(&mut db, "update users set name='Ann where', age=41 where ID=1").unwrap();

    let rows = db.select("users", None).unwrap();
    assert_eq!(rows[0].get("name"), Some(&Value::from("Ann where")));
    assert_eq!(rows[0].get("age"), Some(&Value::Integer(41)));
}

#[test]
fn test_list_tables_sorted() {
    let mut db = Database::in_memory();
    run(&mut db, "create_table zebras name:str").unwrap();
    run(&mut db, "create_table ants name:str").unwrap();
    assert_eq!(render(&run(&mut db, "list_tables")), "- ants\n- zebras");
}

#[test]
fn test_declined_delete_changes_nothing() {
    let mut db = users_db();
    run(&mut db, "insert into users values (\"Alice\", 30)").unwrap();

    let mut prompts = Vec::new();
    let mut decline = |prompt: &str| {
        prompts.push(prompt.to_string());
        false
    };
    let out = db.execute("delete from users where ID=1", &mut decline).unwrap();
    assert_eq!(out, Output::Cancelled);
    assert_eq!(out.to_string(), CANCELLED);
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("delete records"));
    assert_eq!(db.select("users", None).unwrap().len(), 1);
}

#[test]
fn test_declined_drop_keeps_table() {
    let mut db = users_db();
    let out = db.execute("drop_table users", &mut |_: &str| false).unwrap();
    assert_eq!(out, Output::Cancelled);
    assert!(db.info("users").is_ok());

    db.execute("drop_table users", &mut AlwaysConfirm).unwrap();
    assert!(db.list_tables().is_empty());
}

#[test]
fn test_only_destructive_commands_ask() {
    let mut db = Database::in_memory();
    let mut asked = 0;
    let mut counting = |_: &str| {
        asked += 1;
        true
    };
    db.execute("create_table users name:str", &mut counting).unwrap();
    db.execute("insert into users values (A)", &mut counting).unwrap();
    db.execute("select from users", &mut counting).unwrap();
    db.execute("update users set name=B where ID=1", &mut counting).unwrap();
    db.execute("delete from users where ID=1", &mut counting).unwrap();
    db.execute("drop_table users", &mut counting).unwrap();
    assert_eq!(asked, 2);
}

#[test]
fn test_grammar_errors() {
    let mut db = users_db();
    assert!(matches!(run(&mut db, "truncate users"), Err(Error::UnknownCommand(_))));
    assert!(matches!(
        run(&mut db, "delete from users"),
        Err(Error::InvalidCommand(_))
    ));
    assert!(matches!(
        run(&mut db, "update users set age=1"),
        Err(Error::InvalidCommand(_))
    ));
    assert!(matches!(
        run(&mut db, "select from users where age"),
        Err(Error::MalformedFilter(_))
    ));
    assert!(matches!(run(&mut db, "   "), Err(Error::InvalidInput(_))));
}

#[test]
fn test_errors_render_as_lines() {
    let mut db = Database::in_memory();
    assert_eq!(
        render(&run(&mut db, "select from ghosts")),
        "Error: Table \"ghosts\" does not exist"
    );
    assert_eq!(
        render(&run(&mut db, "create_table t age:float")),
        "Error: Unsupported type: float. Supported types: int, str, bool"
    );
    assert_eq!(
        render(&run(&mut db, "create_table t age")),
        "Error: Invalid column spec: age. Use the \"column:type\" format"
    );
    assert_eq!(
        render(&run(&mut db, "create_table t ID:int")),
        "Error: Column \"ID\" is already defined in the table"
    );
}

#[test]
fn test_insert_arity_via_command() {
    let mut db = users_db();
    assert_eq!(
        render(&run(&mut db, "insert into users values (\"Alice\")")),
        "Error: Expected 2 values, got 1"
    );
    assert!(matches!(
        run(&mut db, "insert into users values ()"),
        Err(Error::ArityMismatch { expected: 2, found: 0 })
    ));
}
