//! Tests for the DELETE, INSERT, UPDATE and SELECT grammars.

mod common;
use common::*;

use oxide_grammar::{
    DeleteGrammar, Error, ErrorKind, Filter, Grammar, InsertGrammar, Order, SelectGrammar,
    UpdateGrammar, Value,
};

#[test]
fn delete_without_filter_or_limit() {
    let table = table();
    let stmt = compile_one(&DeleteGrammar::new(&table));
    assert_eq!(stmt.sql(), "DELETE FROM db.table");
    assert!(stmt.arguments().is_empty());
}

#[test]
fn delete_with_filter_and_limit() {
    let table = table();
    let mut filter = Filter::default();
    filter
        .add_column_filter("a", vec!["x", "y"])
        .unwrap()
        .add_column_filter_with("b", 3, ">", Some("or"))
        .unwrap();

    let stmt = compile_one(&DeleteGrammar::new(&table).filter(filter).limit(5));
    assert_eq!(
        stmt.sql(),
        "DELETE FROM db.table WHERE `a` IN (?,?) OR `b` > ? LIMIT 5"
    );
    assert_eq!(stmt.arguments().as_slice(), &[text("x"), text("y"), int(3)]);
}

#[test]
fn insert_pads_short_columns_with_their_last_value() {
    let table = table();
    let insert = InsertGrammar::new(&table)
        .column("foo", vec!["foo"])
        .column("bar", vec![Value::Null])
        .column("baz", vec![1, 2, 3]);

    let statements = compile_all(&insert);
    assert_eq!(statements.len(), 3);
    for (idx, stmt) in statements.iter().enumerate() {
        assert_eq!(
            stmt.sql(),
            "INSERT INTO db.table (`foo`,`bar`,`baz`) VALUES (?,?,?)"
        );
        let row = i64::try_from(idx).unwrap() + 1;
        assert_eq!(
            stmt.arguments().as_slice(),
            &[text("foo"), text(""), int(row)]
        );
    }
}

/// Ragged columns are not an error: a column with 2 values next to one
/// with 3 silently repeats its second value. Callers that expect a
/// mismatch to be rejected must check lengths themselves.
#[test]
fn insert_ragged_columns_repeat_rather_than_fail() {
    let table = table();
    let insert = InsertGrammar::new(&table)
        .column("a", vec![1, 2])
        .column("b", vec!["x", "y", "z"]);

    let statements = compile_all(&insert);
    assert_eq!(statements.len(), 3);
    assert_eq!(
        statements[2].arguments().as_slice(),
        &[int(2), text("z")]
    );
}

#[test]
fn insert_set_column_accumulates() {
    let table = table();
    let mut insert = InsertGrammar::new(&table);
    insert
        .set_column("a", 1)
        .set_column("a", 2)
        .set_column("b", "const");

    let statements = compile_all(&insert);
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].arguments().as_slice(), &[int(1), text("const")]);
    assert_eq!(statements[1].arguments().as_slice(), &[int(2), text("const")]);
}

#[test]
fn insert_errors_are_grammar_errors() {
    let table = table();
    let err = InsertGrammar::new(&table).compile().unwrap_err();
    assert_eq!(err, Error::EmptyInsertData);
    assert_eq!(err.kind(), ErrorKind::Grammar);

    let restricted = table.clone().with_fields(["a"]);
    let err = InsertGrammar::new(&restricted)
        .column("a", 1)
        .column("b", 2)
        .compile()
        .unwrap_err();
    assert!(matches!(err, Error::UnknownColumn { ref column, .. } if column == "b"));
    assert_eq!(err.kind(), ErrorKind::Grammar);
}

#[test]
fn update_and_select_compile_single_statements() {
    let table = table();

    let mut update = UpdateGrammar::new(&table);
    update.set_column("name", "n").unwrap();
    update.filter_mut().add_column_filter("id", 1).unwrap();
    let stmt = compile_one(&update);
    assert_eq!(stmt.sql(), "UPDATE db.table SET `name` = ? WHERE `id` = ?");
    assert_eq!(stmt.arguments().as_slice(), &[text("n"), int(1)]);

    let mut select = SelectGrammar::new(&table)
        .columns(["id"])
        .order_by("id", Order::Desc)
        .limit(1);
    select.filter_mut().add_column_filter("name", Value::Null).unwrap();
    let stmt = compile_one(&select);
    assert_eq!(
        stmt.sql(),
        "SELECT `id` FROM db.table WHERE `name` IS NULL ORDER BY `id` DESC LIMIT 1"
    );
    assert!(stmt.arguments().is_empty());
}

#[test]
fn every_statement_aligns_placeholders_and_arguments() {
    let table = table();
    let mut delete = DeleteGrammar::new(&table);
    delete
        .filter_mut()
        .add_column_filter("a", vec![1, 2, 3])
        .unwrap()
        .add_group_filter(
            |group| {
                group
                    .add_column_filter("b", "x")?
                    .add_column_filter_with("c", Value::Null, false, Some("or"))?;
                Ok(())
            },
            None,
        )
        .unwrap();

    let insert = InsertGrammar::new(&table)
        .column("a", vec![1, 2])
        .column("b", true);

    let deletes = compile_all(&delete);
    let inserts = compile_all(&insert);
    for stmt in deletes.iter().chain(&inserts) {
        assert_eq!(placeholder_count(stmt.sql()), stmt.arguments().len());
    }
}

#[test]
fn popping_an_empty_container_is_a_runtime_error() {
    let table = table();
    let mut container = DeleteGrammar::new(&table).compile().unwrap();
    container.pop().unwrap();
    let err = container.pop().unwrap_err();
    assert_eq!(err, Error::NoStatementAvailable);
    assert_eq!(err.kind(), ErrorKind::Runtime);
}
