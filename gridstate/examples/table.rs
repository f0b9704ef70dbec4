//! Table example - drives a Table through filtering, sorting, and paging.
//!
//! The table composes three engines in a fixed pipeline: filter over the
//! full dataset, sort over the filtered rows, paginate over the sorted rows.
//! This example walks through a small employee dataset and prints each view
//! to stdout.
//!
//! Run with: cargo run --example table

use std::fs::File;

use gridstate::Table;
use gridstate::filter::text;
use gridstate::row::Row;
use gridstate::sort::Direction;
use gridstate::value::Value;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

// =============================================================================
// Data types
// =============================================================================

#[derive(Debug, Clone)]
struct Employee {
    name: &'static str,
    department: &'static str,
    age: i64,
}

impl Row for Employee {
    fn field(&self, name: &str) -> Value {
        match name {
            "name" => Value::from(self.name),
            "department" => Value::from(self.department),
            "age" => Value::from(self.age),
            _ => Value::Null,
        }
    }
}

fn employees() -> Vec<Employee> {
    vec![
        Employee { name: "Amara Quinn", department: "Sales", age: 19 },
        Employee { name: "Bennett Cole", department: "Support", age: 45 },
        Employee { name: "Colette Marsh", department: "Sales", age: 27 },
        Employee { name: "Dante Villa", department: "Support", age: 16 },
        Employee { name: "Edith Rowe", department: "Research", age: 33 },
        Employee { name: "Felix Nash", department: "Sales", age: 22 },
        Employee { name: "Greta Lund", department: "Research", age: 61 },
        Employee { name: "Harvey Stokes", department: "Support", age: 38 },
        Employee { name: "Ines Duval", department: "Sales", age: 29 },
        Employee { name: "Sterling Pugh", department: "Research", age: 30 },
        Employee { name: "Olivia Camacho", department: "Sales", age: 30 },
        Employee { name: "Zola Ray", department: "Sales", age: 30 },
    ]
}

// =============================================================================
// Output
// =============================================================================

fn print_view(title: &str, table: &Table<Employee>) {
    let state = table.state();
    println!("\n== {title} ==");
    println!(
        "   page {} (limit {}), {} matching",
        state.pagination.index, state.pagination.limit, table.total()
    );
    for row in table.rows() {
        println!("   {:16} {:10} {:>3}", row.name, row.department, row.age);
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("table.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, Config::default(), log_file);
    }

    let table = Table::new(employees()).with_matcher("name", text::contains("name"));
    table.set_limit(5);

    print_view("first page, unsorted", &table);

    table.sort("age", Direction::Asc);
    print_view("youngest first", &table);

    table.sort("name", Direction::Desc);
    print_view("age ascending, names descending within a tie", &table);

    table.filter("department", "Sales");
    print_view("sales only", &table);

    table.filter("name", "o");
    print_view("sales whose name contains an o", &table);

    table.go_to(2);
    print_view("second page of the same view", &table);
}
