// ==========================================
// 予算分配シミュレータ - 领域类型定义
// ==========================================
// 职责: 优先策略等封闭枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 优先策略 (Priority Mode)
// ==========================================
// 封闭选择: 每个变体在 engine::priority 中对应一个独立处理器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityMode {
    MaximizeConversions,       // CV 件数最大化（按 CV ペース排序）
    MinimizeCostPerConversion, // CV 单价最小化（按 CPC 排序）
}

impl PriorityMode {
    pub fn all() -> [PriorityMode; 2] {
        [
            PriorityMode::MaximizeConversions,
            PriorityMode::MinimizeCostPerConversion,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityMode::MaximizeConversions => "maximize_conversions",
            PriorityMode::MinimizeCostPerConversion => "minimize_cost_per_conversion",
        }
    }

    /// 画面上的选项文言
    pub fn ui_label(&self) -> &'static str {
        match self {
            PriorityMode::MaximizeConversions => "CVいっぱい！",
            PriorityMode::MinimizeCostPerConversion => "コスパ重視で！",
        }
    }

    /// 导出文件名中使用的短标签
    pub fn file_label(&self) -> &'static str {
        match self {
            PriorityMode::MaximizeConversions => "CV優先",
            PriorityMode::MinimizeCostPerConversion => "COST優先",
        }
    }
}

impl Default for PriorityMode {
    fn default() -> Self {
        PriorityMode::MaximizeConversions
    }
}

impl fmt::Display for PriorityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriorityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // 画面文言 / 文件标签原样匹配
        for mode in PriorityMode::all() {
            if trimmed == mode.ui_label() || trimmed == mode.file_label() {
                return Ok(mode);
            }
        }

        match trimmed.to_lowercase().as_str() {
            "maximize_conversions" | "maximize-conversions" | "conversions" | "cv" => {
                Ok(PriorityMode::MaximizeConversions)
            }
            "minimize_cost_per_conversion"
            | "minimize-cost-per-conversion"
            | "cost_efficiency"
            | "cost-efficiency"
            | "cost" => Ok(PriorityMode::MinimizeCostPerConversion),
            other => Err(format!("未知の優先モード: {}", other)),
        }
    }
}

// ==========================================
// 输入表种类 (Table Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Plan,    // プラン表
    History, // 後方数値データ
}

impl TableKind {
    /// i18n 键
    pub fn message_key(&self) -> &'static str {
        match self {
            TableKind::Plan => "table.plan",
            TableKind::History => "table.history",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Plan => write!(f, "プラン表"),
            TableKind::History => write!(f, "後方数値データ"),
        }
    }
}
