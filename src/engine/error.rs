// ==========================================
// 予算分配シミュレータ - 引擎错误类型
// ==========================================
// 职责: 致命校验错误（在任何计算之前中止，无部分结果）
// 说明: 其余数值异常均在本地降级为 0 并以警告形式返回
// ==========================================

use crate::domain::TableKind;
use crate::i18n::t_with_args;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// 结合键列（媒体コード）缺失
    #[error("{table}に結合キー列がありません（候補: {expected}）")]
    MissingJoinKey { table: TableKind, expected: String },

    /// 後方数値缺少申込日列
    #[error("後方数値データに日付列がありません（候補: {expected}）")]
    MissingDateColumn { expected: String },
}

impl AllocationError {
    /// 面向用户的本地化消息
    pub fn user_message(&self) -> String {
        match self {
            AllocationError::MissingJoinKey { table, expected } => t_with_args(
                "error.missing_join_key",
                &[
                    ("table", &crate::i18n::t(table.message_key())),
                    ("column", expected),
                ],
            ),
            AllocationError::MissingDateColumn { expected } => {
                t_with_args("error.missing_date_column", &[("column", expected)])
            }
        }
    }
}

/// Result 类型别名
pub type AllocationResult<T> = Result<T, AllocationError>;
