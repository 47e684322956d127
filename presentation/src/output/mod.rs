//! Report rendering

pub mod console;
pub mod table;

pub use console::ReportFormatter;
pub use table::AsciiTable;
