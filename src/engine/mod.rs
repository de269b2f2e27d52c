// ==========================================
// 予算分配シミュレータ - 引擎层
// ==========================================
// 职责: 分配算法（CV ペース / 合并 / 策略排序 / 预算分配）
// 红线: 引擎不做文件 IO，不持有跨调用的可变状态
// ==========================================

pub mod allocation;
pub mod distribution;
pub mod error;
pub mod normalize;
pub mod pace;
pub mod priority;
pub mod safe_math;

// 重导出核心引擎
pub use allocation::{allocate, AllocationEngine, AllocationOutcome, AllocationParams};
pub use distribution::{effective_budget, effective_days, BudgetDistributor};
pub use error::{AllocationError, AllocationResult};
pub use normalize::NormalizedInput;
pub use pace::PaceCalculator;
pub use priority::{PriorityOutcome, PrioritySorter};
pub use safe_math::{finite_or_zero, safe_div, safe_div_or_zero};
