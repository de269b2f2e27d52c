// ==========================================
// 予算分配シミュレータ - 导出层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("出力先フォルダを作成できません: {path} ({message})")]
    OutputDirUnavailable { path: String, message: String },

    #[error("ファイルの書き込みに失敗しました: {0}")]
    WriteError(String),

    #[error("CSV の生成に失敗しました: {0}")]
    CsvError(String),

    #[error("JSON の生成に失敗しました: {0}")]
    JsonError(String),

    #[error("Excel の生成に失敗しました: {0}")]
    WorkbookError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::WriteError(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvError(err.to_string())
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for ExportError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        ExportError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::JsonError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::WorkbookError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
