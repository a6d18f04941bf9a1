//! ISO-8601 时间解析
//!
//! 接受带时区偏移（`Z` / `+08:00`）与不带时区两种写法，不带时区的时间按 UTC 处理。

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

// 不带时区的日期时间格式，按尝试顺序排列
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// 解析 ISO-8601 时间字符串为 UTC 时间点
pub fn parse_iso8601(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();

    let mut last_err = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for format in NAIVE_DATETIME_FORMATS {
        match NaiveDateTime::parse_from_str(raw, format) {
            Ok(naive) => return Ok(naive.and_utc()),
            Err(e) => last_err = e,
        }
    }

    // 仅日期：视为当天零点
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| last_err)
}

/// 以微秒精度输出 RFC 3339 时间字符串（UTC，使用 `Z` 后缀）
pub fn format_iso8601(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 已校验的 ISO-8601 时间
///
/// 同时保留客户端提交的原始字符串（对外原样返回）和解析后的时间点（用于比较与过滤）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoTimestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl IsoTimestamp {
    pub fn parse(raw: impl Into<String>) -> Result<Self, chrono::ParseError> {
        let raw = raw.into();
        let instant = parse_iso8601(&raw)?;
        Ok(Self { raw, instant })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn into_raw(self) -> String {
        self.raw
    }
}
