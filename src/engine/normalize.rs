// ==========================================
// 予算分配シミュレータ - 输入校验与归一化
// ==========================================
// 职责:
// 1. 校验结合键 / 日期列（缺失即致命错误）
// 2. プラン表、後方数値映射为类型化行
// 3. 剔除申込日无法解析或媒体コード为空的後方数値行（静默过滤，仅计数）
// ==========================================

use crate::config::ColumnLabels;
use crate::domain::{DataTable, HistoryRecord, PlanRow, TableKind};
use crate::engine::error::{AllocationError, AllocationResult};
use crate::importer::{FieldMapper, HistoryColumns};

/// 归一化后的引擎输入
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    /// 透传列表头
    pub plan_columns: Vec<String>,
    pub plan: Vec<PlanRow>,

    /// プラン表是否含单价列
    pub has_unit_cost_column: bool,

    /// 保留下来的有效後方数値行
    pub history: Vec<HistoryRecord>,

    pub dropped_invalid_date: usize,
    pub dropped_missing_channel: usize,
}

impl NormalizedInput {
    pub fn dropped_rows(&self) -> usize {
        self.dropped_invalid_date + self.dropped_missing_channel
    }
}

/// 校验并归一化两张输入表
///
/// # 错误
/// - MissingJoinKey: 任一表缺少媒体コード列（先检查プラン表）
/// - MissingDateColumn: 後方数値缺少申込日列
pub fn normalize(
    mapper: &FieldMapper,
    plan: &DataTable,
    history: &DataTable,
) -> AllocationResult<NormalizedInput> {
    let labels = mapper.labels();

    let missing_key = |table: TableKind| AllocationError::MissingJoinKey {
        table,
        expected: ColumnLabels::describe(&labels.channel_id),
    };

    let plan_key = mapper
        .resolve_channel_column(plan)
        .ok_or_else(|| missing_key(TableKind::Plan))?;
    let history_key = mapper
        .resolve_channel_column(history)
        .ok_or_else(|| missing_key(TableKind::History))?;
    let date_column =
        mapper
            .resolve_date_column(history)
            .ok_or_else(|| AllocationError::MissingDateColumn {
                expected: ColumnLabels::describe(&labels.application_date),
            })?;

    let plan_columns = mapper.resolve_plan_columns(plan, plan_key);
    let plan_rows = mapper.map_plan_rows(plan, &plan_columns);

    let history_columns = HistoryColumns {
        channel_id: history_key,
        application_date: date_column,
    };

    let mut dropped_invalid_date = 0;
    let mut dropped_missing_channel = 0;
    let retained: Vec<HistoryRecord> = mapper
        .map_history_rows(history, &history_columns)
        .into_iter()
        .filter(|record| {
            if record.application_date.is_none() {
                dropped_invalid_date += 1;
                false
            } else if record.channel_id.is_empty() {
                dropped_missing_channel += 1;
                false
            } else {
                true
            }
        })
        .collect();

    tracing::debug!(
        plan_rows = plan_rows.len(),
        history_rows = history.len(),
        retained = retained.len(),
        dropped_invalid_date,
        dropped_missing_channel,
        "输入归一化完成"
    );

    Ok(NormalizedInput {
        plan_columns: mapper.passthrough_headers(plan, &plan_columns),
        plan: plan_rows,
        has_unit_cost_column: plan_columns.unit_cost.is_some(),
        history: retained,
        dropped_invalid_date,
        dropped_missing_channel,
    })
}
