// ==========================================
// 予算分配シミュレータ - 应用配置
// ==========================================
// 职责: 列名别名、默认优先策略、语言、导出选项
// 存储: JSON 文件（无数据库，会话间不持久化计算结果）
// 查找顺序: 显式路径 > 环境变量 > 用户配置目录 > 内置默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::PriorityMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV_VAR: &str = "MEDIA_BUDGET_ALLOCATOR_CONFIG";

/// 支持的界面语言
pub const SUPPORTED_LOCALES: &[&str] = &["ja", "en"];

const CONFIG_DIR_NAME: &str = "media-budget-allocator";
const CONFIG_FILE_NAME: &str = "config.json";

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ==========================================
// ColumnLabels - 逻辑列 → 表头别名
// ==========================================
// 按列表顺序匹配，第一个存在的表头生效
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub channel_id: Vec<String>,
    pub application_date: Vec<String>,
    pub unit_cost: Vec<String>,
    pub planned_conversions: Vec<String>,
    pub planned_cost: Vec<String>,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            channel_id: labels(&["媒体コード", "channel_id"]),
            application_date: labels(&["申込日", "application_date"]),
            unit_cost: labels(&["単価", "成果単価", "unit_cost"]),
            planned_conversions: labels(&["想定CV", "想定CVソウテイ", "planned_conversions"]),
            planned_cost: labels(&["想定COST", "想定COSTソウテイ", "planned_cost"]),
        }
    }
}

impl ColumnLabels {
    /// 别名列表的展示形式（用于错误消息）
    pub fn describe(aliases: &[String]) -> String {
        aliases.join(" / ")
    }

    fn entries(&self) -> [(&'static str, &Vec<String>); 5] {
        [
            ("columns.channel_id", &self.channel_id),
            ("columns.application_date", &self.application_date),
            ("columns.unit_cost", &self.unit_cost),
            ("columns.planned_conversions", &self.planned_conversions),
            ("columns.planned_cost", &self.planned_cost),
        ]
    }
}

// ==========================================
// ExportConfig - 导出选项
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 导出目录（未指定时使用系统下载目录）
    pub output_dir: Option<PathBuf>,
}

impl ExportConfig {
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

// ==========================================
// AppConfig - 应用配置根
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub locale: String,
    pub default_priority: PriorityMode,
    pub columns: ColumnLabels,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: "ja".to_string(),
            default_priority: PriorityMode::default(),
            columns: ColumnLabels::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 按查找顺序加载配置
    ///
    /// # 参数
    /// - explicit: 命令行显式指定的路径（必须存在）
    ///
    /// # 返回
    /// - 找不到任何配置文件时返回内置默认值
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::load_from_path(Path::new(trimmed));
            }
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => {
                tracing::debug!("未找到配置文件，使用默认配置");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_path(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "已加载配置文件");
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "locale".to_string(),
                message: format!(
                    "未対応の言語です: {}（対応: {}）",
                    self.locale,
                    SUPPORTED_LOCALES.join(", ")
                ),
            });
        }

        for (key, aliases) in self.columns.entries() {
            if aliases.is_empty() || aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "列名の候補を1つ以上、空でない文字列で指定してください".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.columns.channel_id[0], "媒体コード");
        assert_eq!(config.export.output_dir, None);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = AppConfig::from_json_str(
            r#"{ "default_priority": "minimize_cost_per_conversion", "export": { "output_dir": "/tmp/out" } }"#,
        )
        .unwrap();

        assert_eq!(config.default_priority, PriorityMode::MinimizeCostPerConversion);
        assert_eq!(config.export.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.locale, "ja");
        assert_eq!(config.columns, ColumnLabels::default());
    }

    #[test]
    fn test_unsupported_locale_rejected() {
        let result = AppConfig::from_json_str(r#"{ "locale": "fr" }"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { key, .. }) if key == "locale"));
    }

    #[test]
    fn test_blank_column_alias_rejected() {
        let result = AppConfig::from_json_str(r#"{ "columns": { "channel_id": ["", "x"] } }"#);
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { key, .. }) if key == "columns.channel_id")
        );
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = AppConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{ "locale": "en" }}"#).unwrap();

        let config = AppConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = AppConfig::load(Some(Path::new("no_such_config.json")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_explicit_output_dir_wins() {
        let export = ExportConfig {
            output_dir: Some(PathBuf::from("/tmp/exports")),
        };
        assert_eq!(export.resolve_output_dir(), PathBuf::from("/tmp/exports"));
    }
}
