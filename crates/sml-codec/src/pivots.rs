//! Pivot table definition parts (`xl/pivotTables/pivotTableN.xml`).

pub mod schema;
pub mod table_definition;

pub use table_definition::PivotTableDefinition;

/// Default part path of the first pivot table in a workbook package.
pub const DEFAULT_PIVOT_TABLE_PART: &str = "xl/pivotTables/pivotTable1.xml";
