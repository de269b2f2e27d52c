// ==========================================
// 予算分配シミュレータ - 优先策略排序引擎
// ==========================================
// 职责: 按所选 PriorityMode 排序并计算比率（weight）
// 输入: 已合并 pace / projected_cost 的结果行
// 输出: 排序后的结果行 + 是否存在可用排序指标
// ==========================================
// 策略:
// - MaximizeConversions: pace 降序，weight = pace / Σpace
// - MinimizeCostPerConversion: CPC = projected_cost / pace 升序（无定义者置后），
//   weight = (1/CPC) / Σ(1/CPC)
// ==========================================

use crate::domain::{PriorityMode, ResultRow};
use crate::engine::safe_math::{safe_div, safe_div_or_zero};
use std::cmp::Ordering;

/// 排序结果
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityOutcome {
    pub rows: Vec<ResultRow>,

    /// 至少一个媒体具备有限且为正的排序指标
    pub rankable: bool,
}

// ==========================================
// PrioritySorter - 策略排序引擎
// ==========================================
pub struct PrioritySorter {
    // 无状态引擎,不需要注入依赖
}

impl PrioritySorter {
    pub fn new() -> Self {
        Self {}
    }

    /// 按策略分派到对应处理器
    pub fn apply(&self, mode: PriorityMode, rows: Vec<ResultRow>) -> PriorityOutcome {
        match mode {
            PriorityMode::MaximizeConversions => self.maximize_conversions(rows),
            PriorityMode::MinimizeCostPerConversion => self.minimize_cost_per_conversion(rows),
        }
    }

    // ==========================================
    // MaximizeConversions
    // ==========================================

    fn maximize_conversions(&self, mut rows: Vec<ResultRow>) -> PriorityOutcome {
        // 稳定排序，pace 相同时保持プラン表顺序
        rows.sort_by(|a, b| b.pace.total_cmp(&a.pace));

        let total_pace: f64 = rows.iter().map(|r| r.pace).sum();
        let rankable = total_pace > 0.0;

        for row in rows.iter_mut() {
            row.weight = if rankable {
                safe_div_or_zero(row.pace, total_pace)
            } else {
                0.0
            };
        }

        PriorityOutcome { rows, rankable }
    }

    // ==========================================
    // MinimizeCostPerConversion
    // ==========================================

    fn minimize_cost_per_conversion(&self, mut rows: Vec<ResultRow>) -> PriorityOutcome {
        for row in rows.iter_mut() {
            row.cost_per_conversion = Self::cost_per_conversion(row);
        }

        rows.sort_by(|a, b| Self::compare_cost(a.cost_per_conversion, b.cost_per_conversion));

        let inverses: Vec<f64> = rows
            .iter()
            .map(|r| {
                r.cost_per_conversion
                    .and_then(|cpc| safe_div(1.0, cpc))
                    .unwrap_or(0.0)
            })
            .collect();
        let total_inverse: f64 = inverses.iter().sum();
        let rankable = total_inverse > 0.0 && total_inverse.is_finite();

        for (row, inverse) in rows.iter_mut().zip(inverses) {
            row.weight = if rankable {
                safe_div_or_zero(inverse, total_inverse)
            } else {
                0.0
            };
        }

        PriorityOutcome { rows, rankable }
    }

    /// CPC = projected_cost / pace
    ///
    /// 单价缺失、pace 为 0、结果非有限或为负时视为无定义。
    /// CPC = 0（单价为 0）有定义，排在最前，但 1/CPC 无定义故比率为 0
    fn cost_per_conversion(row: &ResultRow) -> Option<f64> {
        row.unit_cost?;
        safe_div(row.projected_cost, row.pace).filter(|cpc| *cpc >= 0.0)
    }

    /// CPC 升序，无定义者排在最后
    fn compare_cost(a: Option<f64>, b: Option<f64>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PrioritySorter {
    fn default() -> Self {
        Self::new()
    }
}
