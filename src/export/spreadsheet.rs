// ==========================================
// 予算分配シミュレータ - 结果表 / 模板导出
// ==========================================
// 结果文件: 予算シミュレーション_{CV優先|COST優先}_{YYYYMMDD}.xlsx（シート: 次月想定値）
// 模板文件: プラン表FMT.xlsx（シート: プラン表FMT，仅表头）
// 数值列写原始数值，展示格式以单元格数字格式附带
// CSV 仅用于标准输出（--format csv）
// ==========================================

use crate::domain::{PriorityMode, ResultColumn, ResultRow, ResultTable};
use crate::export::error::{ExportError, ExportResult};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};

pub const RESULT_SHEET_NAME: &str = "次月想定値";
pub const TEMPLATE_SHEET_NAME: &str = "プラン表FMT";
pub const TEMPLATE_FILE_NAME: &str = "プラン表FMT.xlsx";

/// 模板表头
pub const TEMPLATE_HEADERS: [&str; 4] = ["媒体コード", "AID", "運営社名", "成果単価"];

pub struct SpreadsheetExporter;

impl SpreadsheetExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export_file_name(priority: PriorityMode, today: NaiveDate) -> String {
        format!(
            "予算シミュレーション_{}_{}.xlsx",
            priority.file_label(),
            today.format("%Y%m%d")
        )
    }

    /// 结果表 → xlsx 字节（单一シート）
    pub fn result_to_workbook_bytes(&self, result: &ResultTable) -> ExportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let columns = result.columns();
        let column_formats: Vec<Format> = columns.iter().map(|c| number_format(*c)).collect();

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(RESULT_SHEET_NAME)?;
            write_header(sheet, &result.header_labels(), &header_format)?;

            let offset = result.plan_columns.len();
            for (idx, row) in result.rows.iter().enumerate() {
                let sheet_row = row_index(idx + 1)?;

                for (col, header) in result.plan_columns.iter().enumerate() {
                    let value = passthrough_value(row, header);
                    write_passthrough(sheet, sheet_row, col_index(col)?, value)?;
                }

                for (col, (column, format)) in columns.iter().zip(&column_formats).enumerate() {
                    if let Some(value) = row.value(*column) {
                        sheet.write_number_with_format(
                            sheet_row,
                            col_index(offset + col)?,
                            value,
                            format,
                        )?;
                    }
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// 结果表 → CSV 字节（标准输出用，原始数值）
    pub fn result_to_csv_bytes(&self, result: &ResultTable) -> ExportResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(result.header_labels())?;

        let columns = result.columns();
        for row in &result.rows {
            let mut record: Vec<String> = result
                .plan_columns
                .iter()
                .map(|header| passthrough_value(row, header).to_string())
                .collect();
            record.extend(columns.iter().map(|column| raw_value(row, *column)));
            writer.write_record(&record)?;
        }

        Ok(writer.into_inner()?)
    }

    /// 写出结果文件，返回完整路径
    pub fn write_result(
        &self,
        result: &ResultTable,
        output_dir: &Path,
        today: NaiveDate,
    ) -> ExportResult<PathBuf> {
        ensure_dir(output_dir)?;
        let path = output_dir.join(Self::export_file_name(result.priority, today));
        fs::write(&path, self.result_to_workbook_bytes(result)?)?;

        tracing::info!(path = %path.display(), rows = result.len(), "结果表导出完成");
        Ok(path)
    }

    /// 空白プラン表模板（仅表头）
    pub fn template_bytes(&self) -> ExportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(TEMPLATE_SHEET_NAME)?;
            let headers: Vec<String> = TEMPLATE_HEADERS.iter().map(|h| h.to_string()).collect();
            write_header(sheet, &headers, &header_format)?;
        }
        Ok(workbook.save_to_buffer()?)
    }

    pub fn write_template(&self, output_dir: &Path) -> ExportResult<PathBuf> {
        ensure_dir(output_dir)?;
        let path = output_dir.join(TEMPLATE_FILE_NAME);
        fs::write(&path, self.template_bytes()?)?;

        tracing::info!(path = %path.display(), "模板导出完成");
        Ok(path)
    }
}

impl Default for SpreadsheetExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// 计算列的单元格数字格式（与画面展示一致）
fn number_format(column: ResultColumn) -> Format {
    let pattern = match column {
        ResultColumn::Pace | ResultColumn::DailyConversions => "0.00",
        ResultColumn::ProjectedCost
        | ResultColumn::CostPerConversion
        | ResultColumn::DailyBudget => "¥#,##0",
        ResultColumn::Weight => "0.00%",
        ResultColumn::ProjectedConversions => "0",
    };
    Format::new().set_num_format(pattern)
}

fn write_header(sheet: &mut Worksheet, headers: &[String], format: &Format) -> ExportResult<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col_index(col)?, header, format)?;
    }
    Ok(())
}

/// 透传列: 可无损往返的纯数值按数值写入，其余按文本（保留前导零等）
fn write_passthrough(sheet: &mut Worksheet, row: u32, col: u16, value: &str) -> ExportResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number.to_string() == value => {
            sheet.write_number(row, col, number)?;
        }
        _ => {
            sheet.write_string(row, col, value)?;
        }
    }
    Ok(())
}

fn row_index(idx: usize) -> ExportResult<u32> {
    u32::try_from(idx).map_err(|_| ExportError::WorkbookError(format!("行数が多すぎます: {}", idx)))
}

fn col_index(idx: usize) -> ExportResult<u16> {
    u16::try_from(idx).map_err(|_| ExportError::WorkbookError(format!("列数が多すぎます: {}", idx)))
}

fn passthrough_value<'a>(row: &'a ResultRow, header: &str) -> &'a str {
    row.passthrough
        .iter()
        .find(|(h, _)| h == header)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

fn raw_value(row: &ResultRow, column: ResultColumn) -> String {
    match (column, row.value(column)) {
        (ResultColumn::ProjectedConversions, Some(v)) => format!("{:.0}", v),
        (_, Some(v)) => v.to_string(),
        (_, None) => String::new(),
    }
}

fn ensure_dir(dir: &Path) -> ExportResult<()> {
    fs::create_dir_all(dir).map_err(|e| ExportError::OutputDirUnavailable {
        path: dir.display().to_string(),
        message: e.to_string(),
    })
}
