// ==========================================
// 航班计划报表引擎 - 周班需求模型
// ==========================================
// 与服务端 JSON 模型字段对齐 (camelCase)
// 载入后只读, 报表计算不回写
// ==========================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::daytime::Daytime;
use super::types::{Rsx, Weekday};

// ==========================================
// 允许的计划起飞时刻窗口 (Time Window)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub std_lower_bound: Daytime, // 窗口下界
    pub std_upper_bound: Daytime, // 窗口上界
}

// ==========================================
// 航班范围 (Flight Scope)
// ==========================================
// 周级默认值, 可被逐日覆盖
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightScope {
    pub block_time: i32,                        // 轮挡时间 (分钟, 1-960)
    pub times: Vec<TimeWindow>,                 // 允许的起飞时刻窗口
    pub origin_permission: bool,                // 始发站时刻许可
    pub destination_permission: bool,           // 目的站时刻许可
    pub rsx: Rsx,                               // 班次属性
    pub required: bool,                         // 是否必飞
    pub aircraft_type_ids: Vec<String>,         // 可用机型范围
}

// ==========================================
// 逐日需求 (Day Flight Requirement)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayFlightRequirement {
    pub day: Weekday,                         // 周几 (0-6)
    pub notes: String,                        // 备注
    pub scope: FlightScope,                   // 当日范围 (覆盖周默认)
    pub std: Daytime,                         // 计划起飞时刻 (UTC 基准)
    pub aircraft_type_id: Option<String>,     // 当日选定机型
}

// ==========================================
// 周班需求 (Flight Requirement)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRequirement {
    pub id: String,                   // 需求ID
    pub label: String,                // 编排标签
    pub category: String,             // 分组类别 (可为空)
    pub flight_number: String,        // 航班号 (含承运人前缀)
    pub departure_airport_id: String, // 起飞机场ID
    pub arrival_airport_id: String,   // 到达机场ID
    pub scope: FlightScope,           // 周默认范围
    pub days: Vec<DayFlightRequirement>, // 逐日覆盖
    pub ignored: bool,                // 是否忽略 (不参与报表)
}

impl FlightRequirement {
    pub fn new(
        label: impl Into<String>,
        category: impl Into<String>,
        flight_number: impl Into<String>,
        departure_airport_id: impl Into<String>,
        arrival_airport_id: impl Into<String>,
        scope: FlightScope,
        days: Vec<DayFlightRequirement>,
    ) -> FlightRequirement {
        FlightRequirement {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            category: category.into(),
            flight_number: flight_number.into(),
            departure_airport_id: departure_airport_id.into(),
            arrival_airport_id: arrival_airport_id.into(),
            scope,
            days,
            ignored: false,
        }
    }
}
