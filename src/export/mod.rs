mod document;
mod errors;
#[cfg(test)]
mod tests;
mod workbook;

pub use document::ReportAssembler;
pub use errors::ExportError;
pub use workbook::{write_styled_workbook, CellValue, Table};
