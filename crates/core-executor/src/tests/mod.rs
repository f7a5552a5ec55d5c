pub mod ingest;
pub mod limiter;

use crate::models::{Cell, Field, Row};

pub fn fields(names: &[&str]) -> Vec<Field> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Field::new(index, *name, "VARCHAR"))
        .collect()
}

pub fn numbered_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|n| vec![Cell::from(n.to_string()), Cell::Null])
        .collect()
}
