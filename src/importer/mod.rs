// ==========================================
// 予算分配シミュレータ - 导入层
// ==========================================
// 职责: 外部表格文件 → 内存表 → 类型化行
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod table_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, HistoryColumns, PlanColumns};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use table_importer_trait::FileParser;
