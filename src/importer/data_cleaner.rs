// ==========================================
// 予算分配シミュレータ - 数据清洗器实现
// ==========================================
// 职责: NULL 标准化 / 日期解析 / 金额解析
// 约定: 解析失败一律返回 None，由调用方决定降级策略
// ==========================================

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

/// 日期格式（按顺序尝试）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%Y.%m.%d", "%Y年%m月%d日"];

/// 日期时间格式（仅取日期部分）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

/// Excel 序列值的有效范围（1900-01-01 ..= 9999-12-31）
const EXCEL_SERIAL_MIN: f64 = 1.0;
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0;

/// 视为空值的文本
const NULL_TOKENS: &[&str] = &["nan", "nat", "null", "none"];

/// 金额中需剔除的符号
const AMOUNT_NOISE: &[char] = &['¥', '￥', '円', ',', '，', ' ', '\u{3000}'];

pub struct DataCleaner;

impl DataCleaner {
    /// 标准化 NULL 值（空字符串/空白/NaN 等 → None）
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || NULL_TOKENS.contains(&trimmed.to_lowercase().as_str()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析日期
    ///
    /// # 支持
    /// - YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD / YYYY.MM.DD / YYYY年MM月DD日
    /// - 带时间部分的日期时间（含 RFC 3339）
    /// - Excel 序列值（1899-12-30 起算）
    ///
    /// # 返回
    /// - None: 空值或无法解析
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let value = self.normalize_null(Some(value))?;

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&value, format) {
                return Some(date);
            }
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&value, format) {
                return Some(dt.date());
            }
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return Some(dt.date_naive());
        }

        self.parse_excel_serial(&value)
    }

    fn parse_excel_serial(&self, value: &str) -> Option<NaiveDate> {
        let serial = value.parse::<f64>().ok()?;
        if !serial.is_finite() || !(EXCEL_SERIAL_MIN..=EXCEL_SERIAL_MAX).contains(&serial) {
            return None;
        }

        NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
    }

    /// 解析金额 / 数值（剔除 ¥・円・千分位逗号）
    ///
    /// # 返回
    /// - None: 空值、无法解析或非有限值
    pub fn parse_amount(&self, value: &str) -> Option<f64> {
        let value = self.normalize_null(Some(value))?;
        let cleaned: String = value.chars().filter(|c| !AMOUNT_NOISE.contains(c)).collect();

        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
