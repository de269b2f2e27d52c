// ==========================================
// 予算分配シミュレータ - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ファイルが見つかりません: {0}")]
    NotFound(String),

    #[error("設定ファイルの読み込みに失敗しました: {0}")]
    ReadError(String),

    #[error("設定ファイルの解析に失敗しました: {0}")]
    ParseError(String),

    #[error("設定値が不正です (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::ReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
