//! Order bookkeeping with oxide-grammar.
//!
//! Builds the statements an order service would issue and prints them with
//! their bound arguments. Nothing is executed.
//!
//! Run with: `cargo run -p oxide-grammar --example orders`

use oxide_grammar::{
    Database, DeleteGrammar, Grammar, InsertGrammar, Order, SelectGrammar, StatementContainer,
    UpdateGrammar, Value,
};

fn print(title: &str, statements: &StatementContainer) {
    println!("-- {title}");
    for statement in statements {
        println!("{}", statement.sql());
        println!("   {:?}", statement.arguments().as_slice());
    }
    println!();
}

fn main() -> oxide_grammar::Result<()> {
    let shop = Database::new("shop");
    let orders = shop
        .table("orders")
        .with_fields(["id", "customer_id", "sku", "quantity", "status", "note"]);

    // One customer buys three SKUs: customer_id and status repeat per row
    let insert = InsertGrammar::new(&orders)
        .column("customer_id", 42)
        .column("sku", vec!["A-1", "B-2", "C-3"])
        .column("quantity", vec![1, 5, 2])
        .column("status", "pending")
        .column("note", Value::Null);
    print("place order", &insert.compile()?);

    let mut update = UpdateGrammar::new(&orders).limit(3);
    update.set_column("status", "shipped")?;
    update
        .filter_mut()
        .add_column_filter("customer_id", 42)?
        .add_column_filter_with("status", "cancelled", false, None)?;
    print("ship order", &update.compile()?);

    let mut select = SelectGrammar::new(&orders)
        .columns(["id", "sku", "quantity"])
        .order_by("id", Order::Desc)
        .limit(10);
    select
        .filter_mut()
        .add_column_filter("status", vec!["pending", "shipped"])?
        .add_group_filter(
            |group| {
                group
                    .add_column_filter_with("quantity", 5, ">=", None)?
                    .add_column_filter_with("note", Value::Null, false, Some("or"))?;
                Ok(())
            },
            None,
        )?;
    print("large or annotated orders", &select.compile()?);

    let mut delete = DeleteGrammar::new(&orders);
    delete
        .filter_mut()
        .add_column_filter("status", "cancelled")?;
    print("purge cancelled", &delete.compile()?);

    Ok(())
}
