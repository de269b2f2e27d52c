// ==========================================
// 予算分配シミュレータ - CV ペース计算
// ==========================================
// 职责: 按媒体コード分组，统计 CV 件数与出现 CV 的去重日数
// 公式: pace = conversion_count / active_days（active_days = 0 → 0）
// ==========================================

use crate::domain::{ChannelPace, HistoryRecord};
use crate::engine::safe_math::safe_div_or_zero;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

// ==========================================
// PaceCalculator - CV ペース计算器
// ==========================================
pub struct PaceCalculator {
    // 无状态引擎,不需要注入依赖
}

impl PaceCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算各媒体的 CV ペース
    ///
    /// # 参数
    /// - `history`: 已归一化的後方数値行（申込日缺失的行会被忽略）
    ///
    /// # 返回
    /// 按媒体コード升序排列的 ChannelPace 列表
    pub fn compute(&self, history: &[HistoryRecord]) -> Vec<ChannelPace> {
        let mut grouped: BTreeMap<&str, (u64, BTreeSet<NaiveDate>)> = BTreeMap::new();

        for record in history {
            let Some(date) = record.application_date else {
                continue;
            };
            let entry = grouped.entry(record.channel_id.as_str()).or_default();
            entry.0 += 1;
            entry.1.insert(date);
        }

        grouped
            .into_iter()
            .map(|(channel_id, (conversion_count, dates))| {
                let active_days = dates.len() as u64;
                ChannelPace {
                    channel_id: channel_id.to_string(),
                    conversion_count,
                    active_days,
                    pace: safe_div_or_zero(conversion_count as f64, active_days as f64),
                }
            })
            .collect()
    }

    /// 媒体コード → pace 查找表
    pub fn pace_lookup(paces: &[ChannelPace]) -> HashMap<&str, f64> {
        paces
            .iter()
            .map(|p| (p.channel_id.as_str(), p.pace))
            .collect()
    }
}

impl Default for PaceCalculator {
    fn default() -> Self {
        Self::new()
    }
}
