// ==========================================
// 予算分配シミュレータ - 安全除法
// ==========================================
// 职责: 集中处理除零与 inf/NaN，避免在流水线各处散落有限性检查
// 约定: 无定义的比值返回 None；需要数值的调用方以 0 作为缺省
// ==========================================

/// 安全除法
///
/// # 返回
/// - Some(v): 分母非 0 且结果为有限值
/// - None: 分母为 0、任一操作数非有限、或结果为 inf/NaN
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }

    let value = numerator / denominator;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// 安全除法，无定义时返回 0
pub fn safe_div_or_zero(numerator: f64, denominator: f64) -> f64 {
    safe_div(numerator, denominator).unwrap_or(0.0)
}

/// 非有限值（inf/NaN）→ 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
