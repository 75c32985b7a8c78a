//! Tabular view over a grid window: ranges, column maps and resolved tables.
pub mod column;
pub mod range;
pub mod table;
