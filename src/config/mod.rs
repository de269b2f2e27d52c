// ==========================================
// 予算分配シミュレータ - 配置层
// ==========================================
// 职责: 应用配置加载与校验
// 存储: JSON 配置文件
// ==========================================

pub mod app_config;
pub mod error;

// 重导出核心配置类型
pub use app_config::{
    AppConfig, ColumnLabels, ExportConfig, CONFIG_ENV_VAR, SUPPORTED_LOCALES,
};
pub use error::{ConfigError, ConfigResult};
