// ==========================================
// 予算分配シミュレータ - 非致命警告
// ==========================================
// 职责: 降级处理（置 0 / 缺省）时随结果一并返回的提示
// 说明: 警告仅供参考，不影响结果表的生成
// ==========================================

use crate::domain::types::PriorityMode;
use crate::i18n::{t, t_with_args};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationWarning {
    /// プラン表没有单价列，所有想定COST 置 0
    MissingUnitCostColumn,

    /// 单价单元格为空或无法解析，该行想定COST 置 0
    UnitCostUnavailable {
        row_number: usize,
        channel_id: String,
    },

    /// 後方数値中被剔除的行数
    DroppedHistoryRows {
        invalid_date: usize,
        missing_channel: usize,
    },

    /// 没有任何媒体具备可用的排序指标，比率全部为 0
    NoRankableChannel { priority: PriorityMode },

    /// 结果表为空
    EmptyResult,
}

impl AllocationWarning {
    pub fn code(&self) -> &'static str {
        match self {
            AllocationWarning::MissingUnitCostColumn => "MISSING_UNIT_COST_COLUMN",
            AllocationWarning::UnitCostUnavailable { .. } => "UNIT_COST_UNAVAILABLE",
            AllocationWarning::DroppedHistoryRows { .. } => "DROPPED_HISTORY_ROWS",
            AllocationWarning::NoRankableChannel { .. } => "NO_RANKABLE_CHANNEL",
            AllocationWarning::EmptyResult => "EMPTY_RESULT",
        }
    }

    /// 面向用户的本地化消息
    pub fn message(&self) -> String {
        match self {
            AllocationWarning::MissingUnitCostColumn => t("warning.missing_unit_cost_column"),
            AllocationWarning::UnitCostUnavailable {
                row_number,
                channel_id,
            } => t_with_args(
                "warning.unit_cost_unavailable",
                &[("row", &row_number.to_string()), ("channel", channel_id)],
            ),
            AllocationWarning::DroppedHistoryRows {
                invalid_date,
                missing_channel,
            } => t_with_args(
                "warning.dropped_history_rows",
                &[
                    ("invalid_date", &invalid_date.to_string()),
                    ("missing_channel", &missing_channel.to_string()),
                ],
            ),
            AllocationWarning::NoRankableChannel { priority } => t_with_args(
                "warning.no_rankable_channel",
                &[("priority", priority.ui_label())],
            ),
            AllocationWarning::EmptyResult => t("result.empty"),
        }
    }
}
