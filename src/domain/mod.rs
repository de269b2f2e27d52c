// ==========================================
// 予算分配シミュレータ - 领域模型层
// ==========================================
// 职责: 定义输入表、派生实体、结果表与警告
// 红线: 不含文件解析逻辑,不含分配计算逻辑
// ==========================================

pub mod channel;
pub mod result;
pub mod table;
pub mod types;
pub mod warning;

// 重导出核心类型
pub use channel::{ChannelPace, HistoryRecord, PlanRow};
pub use result::{ResultColumn, ResultRow, ResultTable};
pub use table::DataTable;
pub use types::{PriorityMode, TableKind};
pub use warning::AllocationWarning;
