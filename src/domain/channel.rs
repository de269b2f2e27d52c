// ==========================================
// 予算分配シミュレータ - 媒体实体
// ==========================================
// 职责: プラン表行 / 後方数値行 / 媒体 CV ペース
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PlanRow - プラン表的一行（一个媒体）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    /// 表格行号（表头为第 1 行）
    pub row_number: usize,

    /// 媒体コード（结合键，缺失时为空串）
    pub channel_id: String,

    /// 成果単価（缺失或无法解析时为 None）
    pub unit_cost: Option<f64>,

    /// 想定CV（プラン表自带的计划值，可选）
    pub planned_conversions: Option<f64>,

    /// 透传列（列名, 原值），保持表头顺序
    pub passthrough: Vec<(String, String)>,
}

// ==========================================
// HistoryRecord - 後方数値的一行（一次 CV）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub row_number: usize,
    pub channel_id: String,

    /// 申込日（无法解析时为 None，归一化阶段会剔除）
    pub application_date: Option<NaiveDate>,
}

// ==========================================
// ChannelPace - 媒体 CV ペース
// ==========================================
// pace = conversion_count / active_days（active_days 为 0 时 pace = 0）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPace {
    pub channel_id: String,
    pub conversion_count: u64,
    pub active_days: u64,
    pub pace: f64,
}
