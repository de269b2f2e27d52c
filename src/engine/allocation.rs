// ==========================================
// 予算分配シミュレータ - 分配引擎主流程
// ==========================================
// 流程: 校验/归一化 → CV ペース → 合并 → 策略排序 → 预算分配 → 日均投影
// 性质: 单次、同步、无副作用的纯变换；同一输入多次调用结果相同
// ==========================================

use crate::config::ColumnLabels;
use crate::domain::{
    AllocationWarning, DataTable, PlanRow, PriorityMode, ResultRow, ResultTable,
};
use crate::engine::distribution::{effective_budget, effective_days, BudgetDistributor};
use crate::engine::error::AllocationResult;
use crate::engine::normalize::normalize;
use crate::engine::pace::PaceCalculator;
use crate::engine::priority::PrioritySorter;
use crate::engine::safe_math::finite_or_zero;
use crate::importer::FieldMapper;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 分配参数（标量配置）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationParams {
    pub priority: PriorityMode,

    /// 总预算；未指定或 <= 0 时不做重新分配
    pub budget: Option<f64>,

    /// 剩余天数；未指定或 <= 0 时不产生日均列
    pub days_remaining: Option<i64>,
}

impl AllocationParams {
    pub fn new(priority: PriorityMode) -> Self {
        Self {
            priority,
            ..Self::default()
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_days_remaining(mut self, days: i64) -> Self {
        self.days_remaining = Some(days);
        self
    }
}

/// 分配结果 + 非致命警告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationOutcome {
    pub table: ResultTable,
    pub warnings: Vec<AllocationWarning>,
}

impl AllocationOutcome {
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code() == code)
    }
}

// ==========================================
// AllocationEngine - 分配引擎
// ==========================================
pub struct AllocationEngine {
    field_mapper: FieldMapper,
    pace_calculator: PaceCalculator,
    sorter: PrioritySorter,
    distributor: BudgetDistributor,
}

impl AllocationEngine {
    pub fn new(labels: ColumnLabels) -> Self {
        Self {
            field_mapper: FieldMapper::new(labels),
            pace_calculator: PaceCalculator::new(),
            sorter: PrioritySorter::new(),
            distributor: BudgetDistributor::new(),
        }
    }

    /// 执行预算分配
    ///
    /// # 参数
    /// - plan: プラン表（媒体コード + 单价 + 任意描述列）
    /// - history: 後方数値（媒体コード + 申込日）
    /// - params: 优先策略 / 预算 / 剩余天数
    ///
    /// # 返回
    /// - Ok(AllocationOutcome): 结果表（可能全为 0 比率）+ 警告
    /// - Err: MissingJoinKey / MissingDateColumn（任何计算之前中止）
    pub fn allocate(
        &self,
        plan: &DataTable,
        history: &DataTable,
        params: &AllocationParams,
    ) -> AllocationResult<AllocationOutcome> {
        let span = tracing::debug_span!("allocate", priority = %params.priority);
        let _enter = span.enter();

        // 1. 校验 + 归一化
        let input = normalize(&self.field_mapper, plan, history)?;
        let mut warnings = Vec::new();

        if input.dropped_rows() > 0 {
            warnings.push(AllocationWarning::DroppedHistoryRows {
                invalid_date: input.dropped_invalid_date,
                missing_channel: input.dropped_missing_channel,
            });
        }

        // 2. CV ペース
        let paces = self.pace_calculator.compute(&input.history);
        let pace_lookup = PaceCalculator::pace_lookup(&paces);

        // 3. 合并（左连接，未匹配的媒体 pace = 0）
        if !input.has_unit_cost_column {
            warnings.push(AllocationWarning::MissingUnitCostColumn);
        }
        let rows: Vec<ResultRow> = input
            .plan
            .iter()
            .map(|plan_row| {
                if input.has_unit_cost_column && plan_row.unit_cost.is_none() {
                    warnings.push(AllocationWarning::UnitCostUnavailable {
                        row_number: plan_row.row_number,
                        channel_id: plan_row.channel_id.clone(),
                    });
                }
                Self::merge_row(plan_row, &pace_lookup)
            })
            .collect();

        // 4. 策略排序 + 比率
        let ranked = self.sorter.apply(params.priority, rows);
        let mut rows = ranked.rows;
        if !ranked.rankable && !rows.is_empty() {
            warnings.push(AllocationWarning::NoRankableChannel {
                priority: params.priority,
            });
        }

        // 5. 预算分配
        let budget = effective_budget(params.budget);
        if let Some(budget) = budget {
            self.distributor.distribute(&mut rows, budget);
        }

        // 6. 日均投影
        let days_remaining = effective_days(params.days_remaining);
        if let Some(days) = days_remaining {
            self.distributor.project_daily(&mut rows, days);
        }

        if rows.is_empty() {
            warnings.push(AllocationWarning::EmptyResult);
        }

        for warning in &warnings {
            tracing::warn!(code = warning.code(), "{}", warning.message());
        }

        let table = ResultTable {
            priority: params.priority,
            budget,
            days_remaining,
            plan_columns: input.plan_columns,
            rows,
        };

        tracing::info!(
            channels = table.len(),
            paced_channels = paces.len(),
            budget = ?table.budget,
            days_remaining = ?table.days_remaining,
            warnings = warnings.len(),
            "预算分配完成"
        );

        Ok(AllocationOutcome { table, warnings })
    }

    fn merge_row(plan_row: &PlanRow, pace_lookup: &HashMap<&str, f64>) -> ResultRow {
        let pace = pace_lookup
            .get(plan_row.channel_id.as_str())
            .copied()
            .unwrap_or(0.0);
        let projected_cost = plan_row
            .unit_cost
            .map(|cost| finite_or_zero(pace * cost))
            .unwrap_or(0.0);

        ResultRow {
            channel_id: plan_row.channel_id.clone(),
            passthrough: plan_row.passthrough.clone(),
            unit_cost: plan_row.unit_cost,
            pace,
            projected_cost,
            weight: 0.0,
            cost_per_conversion: None,
            projected_conversions: plan_row.planned_conversions,
            daily_budget: None,
            daily_conversions: None,
        }
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new(ColumnLabels::default())
    }
}

/// 使用默认列名配置执行一次分配
pub fn allocate(
    plan: &DataTable,
    history: &DataTable,
    params: &AllocationParams,
) -> AllocationResult<AllocationOutcome> {
    AllocationEngine::default().allocate(plan, history, params)
}
