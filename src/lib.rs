// ==========================================
// 予算分配シミュレータ - 核心库
// ==========================================
// 输入: プラン表 + 後方数値データ（xlsx / csv）
// 输出: 媒体别 CV ペース、比率、想定COST / 想定CV、日均投影
// 系统定位: 单次同步计算，无持久化
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ja");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表 / 结果 / 警告
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 分配算法
pub mod engine;

// 配置层 - 列名与导出选项
pub mod config;

// 导出层 - 展示与文件输出
pub mod export;

// 应用层 - 会话
pub mod app;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    AllocationWarning, DataTable, PriorityMode, ResultColumn, ResultRow, ResultTable, TableKind,
};

pub use engine::{allocate, AllocationEngine, AllocationError, AllocationOutcome, AllocationParams};

pub use config::{AppConfig, ColumnLabels};

pub use app::{AppError, RunReport, RunStatus, Session};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "予算分配シミュレータ";
