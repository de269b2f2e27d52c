// ==========================================
// 予算分配シミュレータ - 表格导入 Trait
// ==========================================
// 职责: 定义文件解析接口（不包含实现）
// ==========================================

use crate::domain::DataTable;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为内存表
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(DataTable): 表头 + 行记录（已跳过完全空白的行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<DataTable>;
}
