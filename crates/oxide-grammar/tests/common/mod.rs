#![allow(dead_code)]

use oxide_grammar::{
    Argument, Arguments, Database, Filter, Grammar, Statement, StatementContainer, Table,
};

pub fn table() -> Table {
    Database::new("db").table("table")
}

pub fn compile_filter(filter: &Filter) -> (String, Arguments) {
    let mut arguments = Arguments::new();
    let sql = filter.compile(&mut arguments);
    (sql, arguments)
}

pub fn compile_all(grammar: &impl Grammar) -> Vec<Statement> {
    grammar
        .compile()
        .unwrap_or_else(|e| panic!("Failed to compile: {e}"))
        .into_iter()
        .collect()
}

pub fn compile_one(grammar: &impl Grammar) -> Statement {
    let mut container: StatementContainer = grammar
        .compile()
        .unwrap_or_else(|e| panic!("Failed to compile: {e}"));
    assert_eq!(container.len(), 1, "Expected a single statement");
    container.pop().expect("container has one statement")
}

pub fn text(s: &str) -> Argument {
    Argument::Text(String::from(s))
}

pub fn int(n: i64) -> Argument {
    Argument::Int(n)
}

/// Counts `?` markers outside backtick-quoted identifiers.
pub fn placeholder_count(sql: &str) -> usize {
    let mut quoted = false;
    let mut count = 0;
    for c in sql.chars() {
        match c {
            '`' => quoted = !quoted,
            '?' if !quoted => count += 1,
            _ => {}
        }
    }
    count
}
