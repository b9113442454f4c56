//! Report composition pipeline: reference-range parsing, status
//! evaluation, category grouping, document assembly and PDF rendering.

pub mod assemble;
pub mod grouping;
pub mod pdf;
pub mod range;
pub mod status;

pub use assemble::{assemble_report, ReportCategory, ReportDocument, ReportRow, ReportSubcategory};
pub use grouping::{group_results, CategoryGroup, GroupedResults, SubcategoryGroup};
pub use pdf::{export_pdf_to_file, render_report_pdf, shareable_link};
pub use range::{parse_range, ReferenceRange};
pub use status::evaluate_status;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
