// ==========================================
// 予算分配シミュレータ - 字段映射器实现
// ==========================================
// 职责: 表头别名解析 + 原始行 → PlanRow / HistoryRecord
// 说明: 映射不做校验，缺失/非法值以 None 表示
// ==========================================

use crate::config::ColumnLabels;
use crate::domain::{DataTable, HistoryRecord, PlanRow};
use crate::importer::data_cleaner::DataCleaner;
use std::collections::HashMap;

/// プラン表中解析出的列
#[derive(Debug, Clone, PartialEq)]
pub struct PlanColumns {
    pub channel_id: String,
    pub unit_cost: Option<String>,
    pub planned_conversions: Option<String>,
    pub planned_cost: Option<String>,
}

impl PlanColumns {
    /// 被计算列取代、不再透传的列
    fn is_superseded(&self, header: &str) -> bool {
        self.planned_conversions.as_deref() == Some(header)
            || self.planned_cost.as_deref() == Some(header)
    }
}

/// 後方数値中解析出的列
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryColumns {
    pub channel_id: String,
    pub application_date: String,
}

pub struct FieldMapper {
    labels: ColumnLabels,
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new(labels: ColumnLabels) -> Self {
        Self {
            labels,
            cleaner: DataCleaner,
        }
    }

    pub fn labels(&self) -> &ColumnLabels {
        &self.labels
    }

    // ==========================================
    // 列解析
    // ==========================================

    pub fn resolve_channel_column(&self, table: &DataTable) -> Option<String> {
        table.find_column(&self.labels.channel_id).map(String::from)
    }

    pub fn resolve_date_column(&self, table: &DataTable) -> Option<String> {
        table
            .find_column(&self.labels.application_date)
            .map(String::from)
    }

    /// 解析プラン表的可选列（结合键由调用方先行校验）
    pub fn resolve_plan_columns(&self, table: &DataTable, channel_id: String) -> PlanColumns {
        PlanColumns {
            channel_id,
            unit_cost: table.find_column(&self.labels.unit_cost).map(String::from),
            planned_conversions: table
                .find_column(&self.labels.planned_conversions)
                .map(String::from),
            planned_cost: table.find_column(&self.labels.planned_cost).map(String::from),
        }
    }

    // ==========================================
    // 行映射
    // ==========================================

    /// 透传列表头（プラン表顺序，去掉被取代的列）
    pub fn passthrough_headers(&self, table: &DataTable, columns: &PlanColumns) -> Vec<String> {
        table
            .headers
            .iter()
            .filter(|h| !columns.is_superseded(h))
            .cloned()
            .collect()
    }

    pub fn map_plan_rows(&self, table: &DataTable, columns: &PlanColumns) -> Vec<PlanRow> {
        let passthrough_headers = self.passthrough_headers(table, columns);

        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| PlanRow {
                row_number: idx + 2,
                channel_id: self.get_string(row, &columns.channel_id).unwrap_or_default(),
                unit_cost: self.get_amount(row, columns.unit_cost.as_deref()),
                planned_conversions: self.get_amount(row, columns.planned_conversions.as_deref()),
                passthrough: passthrough_headers
                    .iter()
                    .map(|h| (h.clone(), row.get(h).cloned().unwrap_or_default()))
                    .collect(),
            })
            .collect()
    }

    pub fn map_history_rows(
        &self,
        table: &DataTable,
        columns: &HistoryColumns,
    ) -> Vec<HistoryRecord> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| HistoryRecord {
                row_number: idx + 2,
                channel_id: self.get_string(row, &columns.channel_id).unwrap_or_default(),
                application_date: row
                    .get(&columns.application_date)
                    .and_then(|v| self.cleaner.parse_date(v)),
            })
            .collect()
    }

    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        self.cleaner.normalize_null(row.get(key).map(String::as_str))
    }

    fn get_amount(&self, row: &HashMap<String, String>, key: Option<&str>) -> Option<f64> {
        key.and_then(|k| row.get(k))
            .and_then(|v| self.cleaner.parse_amount(v))
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(ColumnLabels::default())
    }
}
