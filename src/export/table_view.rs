// ==========================================
// 予算分配シミュレータ - 终端表格展示
// ==========================================

use crate::domain::ResultTable;
use crate::engine::AllocationOutcome;
use crate::export::format::format_cell;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Row, Table};

/// 渲染结果表（透传列原样，计算列按展示格式）
pub fn render_result_table(result: &ResultTable) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(result.header_labels());

    let columns = result.columns();
    for row in &result.rows {
        let mut cells: Vec<Cell> = result
            .plan_columns
            .iter()
            .map(|header| {
                let value = row
                    .passthrough
                    .iter()
                    .find(|(h, _)| h == header)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or("");
                Cell::new(value)
            })
            .collect();

        cells.extend(columns.iter().map(|column| {
            Cell::new(format_cell(row, *column)).set_alignment(CellAlignment::Right)
        }));

        table.add_row(Row::from(cells));
    }

    table.to_string()
}

/// 终端输出用: 结果为空时返回 None（空结果提示已作为警告输出）
pub fn render_outcome_table(outcome: &AllocationOutcome) -> Option<String> {
    if outcome.is_empty() {
        None
    } else {
        Some(render_result_table(&outcome.table))
    }
}
