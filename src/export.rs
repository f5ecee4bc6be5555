//! Spreadsheet export of batch rows.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Deserialize;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_FILENAME: &str = "result.xlsx";

const HEADERS: [&str; 6] = ["title", "total", "storeCount", "category", "grade", "link"];

/// A row posted back by the client. Every column is optional so partially
/// filled rows still export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportRow {
    pub title: String,
    pub total: u32,
    pub store_count: u32,
    pub category: String,
    pub grade: Option<String>,
    pub link: String,
}

/// Render rows as a single-sheet xlsx workbook, header row first.
pub fn rows_to_xlsx(rows: &[ExportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let worksheet = workbook.add_worksheet();

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_string(r, 0, row.title.as_str())?;
            worksheet.write_number(r, 1, row.total)?;
            worksheet.write_number(r, 2, row.store_count)?;
            worksheet.write_string(r, 3, row.category.as_str())?;
            worksheet.write_string(r, 4, row.grade.as_deref().unwrap_or_default())?;
            worksheet.write_string(r, 5, row.link.as_str())?;
        }
    }

    workbook.save_to_buffer()
}
