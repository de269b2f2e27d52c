// ==========================================
// 予算分配シミュレータ - 原始表格
// ==========================================
// 职责: 上传协作方交付的内存表（表头 + 行记录）
// 说明: 单元格统一为已 TRIM 的字符串，类型转换在 importer 层完成
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 从表格文件解码得到的内存表
///
/// - headers: 表头（保持原始列顺序，透传列按此顺序输出）
/// - rows: 行记录（HashMap<列名, 值>）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 由表头与按列顺序排列的行数据构造
    ///
    /// 超出表头数量的单元格被忽略，不足的列视为空值
    ///
    /// # 示例
    /// ```
    /// use media_budget_allocator::domain::DataTable;
    /// let table = DataTable::from_rows(&["媒体コード", "成果単価"], &[vec!["X", "100"]]);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_rows(headers: &[&str], rows: &[Vec<&str>]) -> Self {
        let mut table = Self::new(headers.iter().map(|h| h.to_string()).collect());
        for cells in rows {
            let row = table
                .headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = cells.get(idx).map(|v| v.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect();
            table.rows.push(row);
        }
        table
    }

    pub fn push_row(&mut self, row: HashMap<String, String>) {
        self.rows.push(row);
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// 按别名顺序查找第一个存在的列名
    pub fn find_column<'a>(&self, aliases: &'a [String]) -> Option<&'a str> {
        aliases
            .iter()
            .find(|alias| self.has_column(alias))
            .map(|alias| alias.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_pads_missing_cells() {
        let table = DataTable::from_rows(&["a", "b", "c"], &[vec!["1", " 2 "]]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("b"), Some(&"2".to_string()));
        assert_eq!(table.rows[0].get("c"), Some(&"".to_string()));
    }

    #[test]
    fn test_find_column_respects_alias_order() {
        let table = DataTable::from_rows(&["成果単価", "単価"], &[]);
        let aliases = vec!["単価".to_string(), "成果単価".to_string()];

        assert_eq!(table.find_column(&aliases), Some("単価"));
        assert_eq!(table.find_column(&["unit_cost".to_string()]), None);
        assert!(table.is_empty());
    }
}
