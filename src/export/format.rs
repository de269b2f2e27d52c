// ==========================================
// 予算分配シミュレータ - 展示格式
// ==========================================
// 规则:
// - CVペース / 1日あたりCV: 小数 2 位
// - 想定COST / CPC / 1日あたり予算: ¥ + 千分位整数
// - 比率: 百分比，小数 2 位
// ==========================================

use crate::domain::{ResultColumn, ResultRow};

pub fn format_decimal2(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// 货币格式（四舍五入为整数，千分位逗号）
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);

    if rounded < 0.0 {
        format!("-¥{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 按列规则格式化数值
pub fn format_value(column: ResultColumn, value: f64) -> String {
    match column {
        ResultColumn::Pace | ResultColumn::DailyConversions => format_decimal2(value),
        ResultColumn::ProjectedCost
        | ResultColumn::CostPerConversion
        | ResultColumn::DailyBudget => format_currency(value),
        ResultColumn::Weight => format_percent(value),
        ResultColumn::ProjectedConversions => format!("{:.0}", value),
    }
}

/// 格式化结果行中的计算列，无值时为空串
pub fn format_cell(row: &ResultRow, column: ResultColumn) -> String {
    row.value(column)
        .map(|v| format_value(column, v))
        .unwrap_or_default()
}
