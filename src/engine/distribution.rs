// ==========================================
// 予算分配シミュレータ - 预算分配与日均投影
// ==========================================
// 职责:
// - 预算 > 0 时: projected_cost = weight * budget,
//   projected_conversions = floor(projected_cost / unit_cost)
// - 剩余天数 > 0 时: 日均预算 / 日均 CV
// 阈值: budget == 0 与未指定预算等价（不做重新分配）
// ==========================================

use crate::domain::ResultRow;
use crate::engine::safe_math::{finite_or_zero, safe_div};

/// 实际生效的预算（仅有限且 > 0 时）
pub fn effective_budget(budget: Option<f64>) -> Option<f64> {
    budget.filter(|b| b.is_finite() && *b > 0.0)
}

/// 实际生效的剩余天数（仅 > 0 时）
pub fn effective_days(days_remaining: Option<i64>) -> Option<u64> {
    days_remaining
        .filter(|d| *d > 0)
        .and_then(|d| u64::try_from(d).ok())
}

// ==========================================
// BudgetDistributor - 预算分配器
// ==========================================
pub struct BudgetDistributor {
    // 无状态引擎,不需要注入依赖
}

impl BudgetDistributor {
    pub fn new() -> Self {
        Self {}
    }

    /// 按比率分配预算
    ///
    /// 单价缺失 / 非正 / 比值非有限时 projected_conversions = 0
    pub fn distribute(&self, rows: &mut [ResultRow], budget: f64) {
        for row in rows.iter_mut() {
            row.projected_cost = finite_or_zero(row.weight * budget);
            row.projected_conversions = Some(Self::conversions_for(row));
        }
    }

    fn conversions_for(row: &ResultRow) -> f64 {
        row.unit_cost
            .filter(|cost| *cost > 0.0)
            .and_then(|cost| safe_div(row.projected_cost, cost))
            .map(f64::floor)
            .unwrap_or(0.0)
    }

    /// 日均投影
    ///
    /// projected_conversions 不存在时不产生日均 CV
    pub fn project_daily(&self, rows: &mut [ResultRow], days_remaining: u64) {
        let days = days_remaining as f64;
        for row in rows.iter_mut() {
            row.daily_budget = Some(safe_div(row.projected_cost, days).unwrap_or(0.0));
            row.daily_conversions = row
                .projected_conversions
                .map(|cv| safe_div(cv, days).unwrap_or(0.0));
        }
    }
}

impl Default for BudgetDistributor {
    fn default() -> Self {
        Self::new()
    }
}
