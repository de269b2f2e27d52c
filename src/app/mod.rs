// ==========================================
// 予算分配シミュレータ - 应用层
// ==========================================
// 职责: 会话状态（已读入的表 + 运行状态），串联导入与引擎
// ==========================================

pub mod error;
pub mod session;

pub use error::{AppError, AppResult};
pub use session::{RunReport, RunStatus, Session};
