#![allow(dead_code)]

use dalgen_schema::{
    ColumnDef, ConstraintDef, ConstraintKindDef, Database, DatabaseDef, ForeignRefDef, TableDef,
    ValueType,
};

pub fn primary_key(name: &str) -> ConstraintDef {
    ConstraintDef {
        name: name.to_string(),
        kind: ConstraintKindDef::PrimaryKey,
        columns: vec![String::from("id")],
        references: None,
    }
}

pub fn foreign_key(name: &str, column: &str, target: &str) -> ConstraintDef {
    ConstraintDef {
        name: name.to_string(),
        kind: ConstraintKindDef::ForeignKey,
        columns: vec![column.to_string()],
        references: Some(ForeignRefDef {
            table: target.to_string(),
            columns: vec![String::from("id")],
        }),
    }
}

/// A three-table shop catalog with a foreign-key chain:
/// `order_items.order_id -> orders.id` and
/// `orders.customer_id -> customers.id`. Every table has a single-column
/// identity primary key.
pub fn shop() -> Database {
    Database::from_def(&DatabaseDef {
        name: String::from("shop"),
        tables: vec![
            TableDef {
                name: String::from("customers"),
                schema: Some(String::from("dbo")),
                columns: vec![
                    ColumnDef::new("id", ValueType::Int64).identity(),
                    ColumnDef::new("name", ValueType::Text),
                    ColumnDef::new("email", ValueType::Text).nullable(),
                ],
                constraints: vec![primary_key("pk_customers")],
            },
            TableDef {
                name: String::from("orders"),
                schema: Some(String::from("dbo")),
                columns: vec![
                    ColumnDef::new("id", ValueType::Int64).identity(),
                    ColumnDef::new("customer_id", ValueType::Int64),
                    ColumnDef::new("total", ValueType::Decimal),
                ],
                constraints: vec![
                    primary_key("pk_orders"),
                    foreign_key("fk_orders_customers", "customer_id", "customers"),
                ],
            },
            TableDef {
                name: String::from("order_items"),
                schema: Some(String::from("dbo")),
                columns: vec![
                    ColumnDef::new("id", ValueType::Int64).identity(),
                    ColumnDef::new("order_id", ValueType::Int64),
                    ColumnDef::new("quantity", ValueType::Int32),
                ],
                constraints: vec![
                    primary_key("pk_order_items"),
                    foreign_key("fk_items_orders", "order_id", "orders"),
                ],
            },
        ],
        views: vec![],
    })
    .expect("fixture catalog loads")
}

/// A catalog whose single table has a composite primary key, so the
/// pagination planner cannot take the single-key path.
pub fn composite_keyed() -> Database {
    Database::from_def(&DatabaseDef {
        name: String::from("ledger"),
        tables: vec![TableDef {
            name: String::from("entries"),
            schema: None,
            columns: vec![
                ColumnDef::new("account", ValueType::Int64),
                ColumnDef::new("seq", ValueType::Int64),
                ColumnDef::new("amount", ValueType::Decimal),
            ],
            constraints: vec![ConstraintDef {
                name: String::from("pk_entries"),
                kind: ConstraintKindDef::PrimaryKey,
                columns: vec![String::from("account"), String::from("seq")],
                references: None,
            }],
        }],
        views: vec![],
    })
    .expect("fixture catalog loads")
}
