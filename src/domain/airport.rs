// ==========================================
// 航班计划报表引擎 - 机场与机型主数据
// ==========================================
// 当地时刻用平移后的 UTC 时间轴表示:
// 换算只加偏移量, 不改变时区标记
// ==========================================

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// UTC 偏移时段 (UTC Offset Period)
// ==========================================
// 夏令时机场有多条记录, 按 UTC 起止时刻分段
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtcOffsetPeriod {
    pub dst: bool,                            // 是否夏令时时段
    pub start_date_time_utc: DateTime<Utc>,   // 时段起点 (UTC, 闭)
    pub end_date_time_utc: DateTime<Utc>,     // 时段终点 (UTC, 开)
    pub start_date_time_local: DateTime<Utc>, // 时段起点的当地钟面
    pub end_date_time_local: DateTime<Utc>,   // 时段终点的当地钟面
    pub offset: i32,                          // 偏移分钟数 (当地 - UTC)
}

// ==========================================
// 机场 (Airport)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub id: String,                            // 机场ID
    pub name: String,                          // IATA 三字码
    pub full_name: String,                     // 机场全名
    pub international: bool,                   // 是否国际机场
    pub utc_offsets: Vec<UtcOffsetPeriod>,     // UTC 偏移分段表
}

impl Airport {
    /// 时刻点命中时段的偏移分钟数, 无命中按 0 处理
    pub fn offset_at(&self, instant: DateTime<Utc>) -> i32 {
        self.utc_offsets
            .iter()
            .find(|period| {
                period.start_date_time_utc <= instant && instant < period.end_date_time_utc
            })
            .map(|period| period.offset)
            .unwrap_or(0)
    }

    /// UTC 时刻点换算为当地钟面时刻点
    pub fn convert_utc_to_local(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant + Duration::minutes(self.offset_at(instant) as i64)
    }
}

// ==========================================
// 机型 (Aircraft Type)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftType {
    pub id: String,   // 机型ID
    pub name: String, // 机型名称
}
