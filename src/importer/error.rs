// ==========================================
// 予算分配シミュレータ - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("ファイルが存在しません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です: {0}（.xlsx/.xlsm/.xls/.xlsb/.ods/.csv のみ）")]
    UnsupportedFormat(String),

    #[error("ファイルの読み込みに失敗しました: {0}")]
    FileReadError(String),

    #[error("Excel の解析に失敗しました: {0}")]
    ExcelParseError(String),

    #[error("CSV の解析に失敗しました: {0}")]
    CsvParseError(String),

    // ===== 内容相关错误 =====
    #[error("ワークシートがありません: {0}")]
    EmptyWorkbook(String),

    #[error("ヘッダー行がありません: {0}")]
    MissingHeaderRow(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
