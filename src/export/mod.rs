// ==========================================
// 予算分配シミュレータ - 展示 / 导出层
// ==========================================
// 职责: 展示格式化、终端表格、Excel 导出、CSV / JSON 输出
// ==========================================

pub mod error;
pub mod format;
pub mod json;
pub mod spreadsheet;
pub mod table_view;

pub use error::{ExportError, ExportResult};
pub use format::{format_cell, format_currency, format_decimal2, format_percent, format_value};
pub use json::render_json;
pub use spreadsheet::{
    SpreadsheetExporter, RESULT_SHEET_NAME, TEMPLATE_FILE_NAME, TEMPLATE_HEADERS,
    TEMPLATE_SHEET_NAME,
};
pub use table_view::{render_outcome_table, render_result_table};
