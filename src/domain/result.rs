// ==========================================
// 予算分配シミュレータ - 分配结果表
// ==========================================
// 职责: ResultTable / ResultRow / 输出列定义
// 生命周期: 每次调用新建，交给展示/导出协作方后丢弃
// ==========================================

use crate::domain::types::PriorityMode;
use serde::{Deserialize, Serialize};

// ==========================================
// ResultColumn - 计算列
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultColumn {
    Pace,
    ProjectedCost,
    CostPerConversion,
    Weight,
    ProjectedConversions,
    DailyBudget,
    DailyConversions,
}

impl ResultColumn {
    /// 输出表头（沿用画面上的列名）
    pub fn label(&self) -> &'static str {
        match self {
            ResultColumn::Pace => "CVペース",
            ResultColumn::ProjectedCost => "想定COST",
            ResultColumn::CostPerConversion => "CPC",
            ResultColumn::Weight => "比率",
            ResultColumn::ProjectedConversions => "想定CV",
            ResultColumn::DailyBudget => "1日あたり予算",
            ResultColumn::DailyConversions => "1日あたりCV",
        }
    }
}

// ==========================================
// ResultRow - 结果行（对应一行プラン表）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub channel_id: String,

    /// プラン表原始列（列名, 原值）
    pub passthrough: Vec<(String, String)>,

    pub unit_cost: Option<f64>,
    pub pace: f64,
    pub projected_cost: f64,
    pub weight: f64,

    /// 仅 MinimizeCostPerConversion 分支计算；无定义时为 None
    pub cost_per_conversion: Option<f64>,

    /// 有预算时为 floor(projected_cost / unit_cost)，否则取プラン表的想定CV
    pub projected_conversions: Option<f64>,

    pub daily_budget: Option<f64>,
    pub daily_conversions: Option<f64>,
}

impl ResultRow {
    /// 取计算列的数值
    pub fn value(&self, column: ResultColumn) -> Option<f64> {
        match column {
            ResultColumn::Pace => Some(self.pace),
            ResultColumn::ProjectedCost => Some(self.projected_cost),
            ResultColumn::CostPerConversion => self.cost_per_conversion,
            ResultColumn::Weight => Some(self.weight),
            ResultColumn::ProjectedConversions => self.projected_conversions,
            ResultColumn::DailyBudget => self.daily_budget,
            ResultColumn::DailyConversions => self.daily_conversions,
        }
    }
}

// ==========================================
// ResultTable - 分配结果表
// ==========================================
// 行顺序 = 排序阶段输出顺序（按所选策略的期望度降序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub priority: PriorityMode,

    /// 实际生效的预算（> 0 时才有值）
    pub budget: Option<f64>,

    /// 实际生效的剩余天数（> 0 时才有值）
    pub days_remaining: Option<u64>,

    /// 透传列表头（プラン表列顺序）
    pub plan_columns: Vec<String>,

    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 当前结果中实际存在的计算列（按输出顺序）
    pub fn columns(&self) -> Vec<ResultColumn> {
        let mut columns = vec![ResultColumn::Pace, ResultColumn::ProjectedCost];

        if self.priority == PriorityMode::MinimizeCostPerConversion {
            columns.push(ResultColumn::CostPerConversion);
        }
        columns.push(ResultColumn::Weight);

        let has_conversions = self.budget.is_some()
            || self.rows.iter().any(|r| r.projected_conversions.is_some());
        if has_conversions {
            columns.push(ResultColumn::ProjectedConversions);
        }

        if self.days_remaining.is_some() {
            columns.push(ResultColumn::DailyBudget);
            if has_conversions {
                columns.push(ResultColumn::DailyConversions);
            }
        }

        columns
    }

    /// 完整表头：透传列 + 计算列
    pub fn header_labels(&self) -> Vec<String> {
        self.plan_columns
            .iter()
            .cloned()
            .chain(self.columns().iter().map(|c| c.label().to_string()))
            .collect()
    }

    pub fn row(&self, channel_id: &str) -> Option<&ResultRow> {
        self.rows.iter().find(|r| r.channel_id == channel_id)
    }

    pub fn channel_order(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.channel_id.as_str()).collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.rows.iter().map(|r| r.weight).sum()
    }

    pub fn total_projected_cost(&self) -> f64 {
        self.rows.iter().map(|r| r.projected_cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(channel_id: &str, projected_conversions: Option<f64>) -> ResultRow {
        ResultRow {
            channel_id: channel_id.to_string(),
            passthrough: vec![("媒体コード".to_string(), channel_id.to_string())],
            unit_cost: Some(100.0),
            pace: 1.0,
            projected_cost: 100.0,
            weight: 0.5,
            cost_per_conversion: None,
            projected_conversions,
            daily_budget: None,
            daily_conversions: None,
        }
    }

    fn table(priority: PriorityMode, budget: Option<f64>, days: Option<u64>) -> ResultTable {
        ResultTable {
            priority,
            budget,
            days_remaining: days,
            plan_columns: vec!["媒体コード".to_string()],
            rows: vec![row("X", None), row("Y", None)],
        }
    }

    #[test]
    fn test_columns_without_budget_or_days() {
        let t = table(PriorityMode::MaximizeConversions, None, None);
        assert_eq!(
            t.columns(),
            vec![ResultColumn::Pace, ResultColumn::ProjectedCost, ResultColumn::Weight]
        );
    }

    #[test]
    fn test_columns_cost_efficiency_with_budget_and_days() {
        let t = table(PriorityMode::MinimizeCostPerConversion, Some(1000.0), Some(10));
        assert_eq!(
            t.columns(),
            vec![
                ResultColumn::Pace,
                ResultColumn::ProjectedCost,
                ResultColumn::CostPerConversion,
                ResultColumn::Weight,
                ResultColumn::ProjectedConversions,
                ResultColumn::DailyBudget,
                ResultColumn::DailyConversions,
            ]
        );
    }

    #[test]
    fn test_columns_days_without_conversions_skips_daily_conversions() {
        let t = table(PriorityMode::MaximizeConversions, None, Some(5));
        assert!(t.columns().contains(&ResultColumn::DailyBudget));
        assert!(!t.columns().contains(&ResultColumn::DailyConversions));
    }

    #[test]
    fn test_header_labels_and_totals() {
        let t = table(PriorityMode::MaximizeConversions, None, None);
        assert_eq!(t.header_labels(), vec!["媒体コード", "CVペース", "想定COST", "比率"]);
        assert_eq!(t.channel_order(), vec!["X", "Y"]);
        assert!((t.total_weight() - 1.0).abs() < 1e-9);
        assert!((t.total_projected_cost() - 200.0).abs() < 1e-9);
    }
}
