//! Shared people fixture for engine tests.
#![allow(dead_code)]

use gridstate::row::Row;
use gridstate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: &'static str,
    pub age: i64,
    pub active: bool,
}

impl Person {
    fn new(name: &'static str, age: i64, active: bool) -> Self {
        Self { name, age, active }
    }
}

impl Row for Person {
    fn field(&self, name: &str) -> Value {
        match name {
            "name" => Value::from(self.name),
            "age" => Value::from(self.age),
            "active" => Value::from(self.active),
            _ => Value::Null,
        }
    }
}

/// Seventeen people; three share age 30, thirteen are active.
pub fn people() -> Vec<Person> {
    vec![
        Person::new("Amara Quinn", 19, true),
        Person::new("Bennett Cole", 45, true),
        Person::new("Colette Marsh", 27, false),
        Person::new("Dante Villa", 16, true),
        Person::new("Edith Rowe", 33, true),
        Person::new("Felix Nash", 22, true),
        Person::new("Greta Lund", 61, false),
        Person::new("Harvey Stokes", 38, true),
        Person::new("Ines Duval", 29, true),
        Person::new("Jonas Reed", 17, false),
        Person::new("Sterling Pugh", 30, true),
        Person::new("Lena Moss", 24, true),
        Person::new("Olivia Camacho", 30, true),
        Person::new("Pia Sandoval", 52, false),
        Person::new("Quentin Ash", 41, true),
        Person::new("Zola Ray", 30, true),
        Person::new("Ruth Calder", 26, true),
    ]
}

pub fn names(rows: &[Person]) -> Vec<&'static str> {
    rows.iter().map(|p| p.name).collect()
}
