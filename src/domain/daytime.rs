// ==========================================
// 航班计划报表引擎 - 日内时刻 (Daytime)
// ==========================================
// 以午夜起算的分钟数表示一天内的时刻
// 允许负值与超过 1440 的值 (跨日航段在格式化时截取)
// 无效时刻参与运算时报错, 构造与解析本身不报错
// ==========================================

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 对无效时刻取值、格式化或比较时返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("This daytime is invalid.")]
pub struct DaytimeError;

/// 格式化样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// HH:mm (补零, 带冒号)
    PaddedColon,
    /// H:mm (小时不补零)
    ShortColon,
    /// HHmm (补零, 无冒号)
    Padded,
    /// Hmm (小时不补零, 无冒号)
    Short,
}

// ==========================================
// Daytime
// ==========================================
// 序列化格式: 分钟数或 null (无效)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Daytime {
    minutes: Option<i32>,
}

impl Daytime {
    /// 无效时刻
    pub fn invalid() -> Daytime {
        Daytime { minutes: None }
    }

    /// 由分钟数构造, 负值合法
    pub fn from_minutes(minutes: i32) -> Daytime {
        Daytime { minutes: Some(minutes) }
    }

    /// 解析文本时刻, 失败返回无效时刻而非错误
    ///
    /// 支持三种写法:
    /// - "H:mm" 冒号式, 分钟部分不限 60 ("1:75" = 135)
    /// - 三位以上纯数字, 末两位为分钟 ("0330" = 210)
    /// - 一到两位纯数字, 按整小时计 ("5" = 300)
    ///
    /// 三种写法均可带负号前缀
    pub fn parse(source: &str) -> Daytime {
        let (sign, body) = match source.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, source),
        };

        if let Some((hours_part, minutes_part)) = body.split_once(':') {
            if !is_digits(hours_part) || !is_digits(minutes_part) {
                return Daytime::invalid();
            }
            let hours: i64 = match hours_part.parse() {
                Ok(value) => value,
                Err(_) => return Daytime::invalid(),
            };
            let minutes: i64 = match minutes_part.parse() {
                Ok(value) => value,
                Err(_) => return Daytime::invalid(),
            };
            return Daytime::from_wide(sign * (hours * 60 + minutes));
        }

        if !is_digits(body) {
            return Daytime::invalid();
        }
        match body.len() {
            0 => Daytime::invalid(),
            1 | 2 => match body.parse::<i64>() {
                Ok(hours) => Daytime::from_wide(sign * hours * 60),
                Err(_) => Daytime::invalid(),
            },
            _ => {
                let split = body.len() - 2;
                let hours: i64 = match body[..split].parse() {
                    Ok(value) => value,
                    Err(_) => return Daytime::invalid(),
                };
                let minutes: i64 = match body[split..].parse() {
                    Ok(value) => value,
                    Err(_) => return Daytime::invalid(),
                };
                Daytime::from_wide(sign * (hours * 60 + minutes))
            }
        }
    }

    /// 取时刻点相对基准日 UTC 午夜的分钟数, 早于午夜按 0 计
    pub fn from_instant(instant: DateTime<Utc>, base_date: DateTime<Utc>) -> Daytime {
        let midnight = base_date.date_naive().and_time(NaiveTime::MIN).and_utc();
        let minutes = (instant - midnight).num_minutes().max(0);
        Daytime::from_wide(minutes)
    }

    /// 取时刻点的 UTC 钟面时刻 (小时*60+分钟)
    pub fn from_clock(instant: DateTime<Utc>) -> Daytime {
        Daytime::from_minutes((instant.hour() * 60 + instant.minute()) as i32)
    }

    fn from_wide(minutes: i64) -> Daytime {
        match i32::try_from(minutes) {
            Ok(value) => Daytime::from_minutes(value),
            Err(_) => Daytime::invalid(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.minutes.is_some()
    }

    /// 分钟数, 无效时刻报错
    pub fn minutes(&self) -> Result<i32, DaytimeError> {
        self.minutes.ok_or(DaytimeError)
    }

    /// 格式化为钟面文本
    ///
    /// # 参数
    /// - `clip`: 先对绝对值取模 1440 再格式化 (跨日截取)
    pub fn format(&self, format: TimeFormat, clip: bool) -> Result<String, DaytimeError> {
        let raw = self.minutes()?;
        let negative = raw < 0;
        let mut minutes = raw.unsigned_abs();
        if clip {
            minutes %= 24 * 60;
        }
        let prefix = if negative { "-" } else { "" };
        let hours = minutes / 60;
        let minutes = minutes % 60;
        Ok(match format {
            TimeFormat::PaddedColon => format!("{}{:02}:{:02}", prefix, hours, minutes),
            TimeFormat::ShortColon => format!("{}{}:{:02}", prefix, hours, minutes),
            TimeFormat::Padded => format!("{}{:02}{:02}", prefix, hours, minutes),
            TimeFormat::Short => format!("{}{}{:02}", prefix, hours, minutes),
        })
    }

    /// 比较两个时刻, 任一无效即报错
    pub fn compare(&self, other: &Daytime) -> Result<std::cmp::Ordering, DaytimeError> {
        let left = self.minutes()?;
        let right = other.minutes()?;
        Ok(left.cmp(&right))
    }

    /// 放到基准日上得到具体时刻点 (基准日 UTC 午夜 + 分钟数)
    pub fn to_instant(&self, base_date: DateTime<Utc>) -> Result<DateTime<Utc>, DaytimeError> {
        let minutes = self.minutes()?;
        let midnight = base_date.date_naive().and_time(NaiveTime::MIN).and_utc();
        Ok(midnight + Duration::minutes(minutes as i64))
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
