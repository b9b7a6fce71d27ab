//! Date Conversion Module
//!
//! シリアル値・ISO 8601文字列から日時への変換を提供するモジュール。
//! ロケールに依存しない固定の規約で解析します。

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::api::DateSystem;
use crate::error::XlsxReaderError;

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

/// シリアル値を日時に変換
///
/// # 引数
///
/// * `serial` - シリアル値（整数部が日数、小数部が時刻）
/// * `system` - 日付システム
///
/// # 日付システム
///
/// - 1900年システム: 1899年12月30日起算（シリアル値43831 = 2020-01-01）
/// - 1904年システム: 1904年1月1日起算
///
/// 負のシリアル値では、小数部は起算日より前の日の時刻として扱われます
/// （-1.25 = 1899-12-29 06:00）。時刻はミリ秒単位に丸められます。
pub(crate) fn serial_to_datetime(
    serial: f64,
    system: DateSystem,
) -> Result<NaiveDateTime, XlsxReaderError> {
    let overflow = || XlsxReaderError::InvalidCellValue {
        address: String::new(),
        message: format!("serial date {} is out of range", serial),
    };

    // chrono の日付範囲（約±26万年）に収まらない値は先に除外する
    if !serial.is_finite() || serial.abs() > 90_000_000.0 {
        return Err(overflow());
    }

    let epoch = match system {
        DateSystem::V1900 => NaiveDate::from_ymd_opt(1899, 12, 30),
        DateSystem::V1904 => NaiveDate::from_ymd_opt(1904, 1, 1),
    }
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .ok_or_else(overflow)?;

    let days = serial.trunc();
    let time_ms = ((serial - days).abs() * MILLISECONDS_PER_DAY).round() as i64;

    epoch
        .checked_add_signed(Duration::days(days as i64))
        .and_then(|date| date.checked_add_signed(Duration::milliseconds(time_ms)))
        .ok_or_else(overflow)
}

/// `t="d"`セルのISO 8601文字列を解析
///
/// 日付のみ、日時（秒の小数部可）、タイムゾーン付きの形式を受け付けます。
/// タイムゾーン付きの場合はその現地時刻をそのまま採用します。
pub(crate) fn parse_iso_datetime(text: &str) -> Result<NaiveDateTime, XlsxReaderError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }

    for pattern in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(dt);
        }
    }

    if let Some(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(date);
    }

    Err(XlsxReaderError::InvalidCellValue {
        address: String::new(),
        message: format!("'{}' is not an ISO 8601 date", text),
    })
}
