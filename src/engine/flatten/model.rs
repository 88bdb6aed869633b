// ==========================================
// 展平引擎 - 数据模型
// ==========================================
// 职责: 周视图航班行及其状态标记的结构定义
// ==========================================

use std::sync::Arc;

use crate::domain::{Airport, Daytime, Rsx, Weekday};

/// 周几单元格符号: 双向许可齐全
pub const CIRCLE: &str = "●";
/// 周几单元格符号: 双向许可均缺失
pub const EMPTY_CIRCLE: &str = "○";
/// 周几单元格符号: 国内侧许可缺失
pub const LEFT_HALF_CIRCLE: &str = "◐";
/// 周几单元格符号: 目的地侧许可缺失
pub const RIGHT_HALF_CIRCLE: &str = "◑";

/// 周视图航班行。
///
/// 一行对应一个合并键 (到达机场, 起飞机场, 轮挡, 规范化航班号, 起飞分钟),
/// 周几符号与频次在逐日合并时累积。
#[derive(Debug, Clone)]
pub struct FlattenedFlight {
    pub id: String,
    pub label: String,
    pub category: String,
    pub flight_number: String,      // 规范化后的航班号
    pub full_flight_number: String, // 原始航班号
    pub departure_airport: Arc<Airport>,
    pub arrival_airport: Arc<Airport>,
    pub block_time: i32,
    pub formatted_block_time: String,
    pub days: Vec<Weekday>,     // 本地周几, 首次出现顺序
    pub utc_days: Vec<Weekday>, // UTC 周几, 首次出现顺序
    pub std: Daytime,
    pub sta: Daytime, // UTC 到达钟面时刻
    pub notes: Vec<String>,
    pub note: String,
    pub local_std: String,
    pub local_sta: String,
    pub utc_std: String,
    pub utc_sta: String,
    pub diff_local_std_utc_std: i32,
    pub diff_local_std_local_sta: i32,
    pub diff_local_std_utc_sta: i32,
    pub route: String,
    pub parent_route: String,
    pub aircraft_type: String,
    pub real_frequency: u32,
    pub standby_frequency: u32,
    pub extra_frequency: u32,
    pub frequency: String,
    pub day_chars: [String; 7],        // 周六..周五 单元格符号
    pub rsx_by_day: [Option<Rsx>; 7],  // 周六..周五 班次性质
    pub destination_no_permission_week_days: Vec<Weekday>,
    pub domestic_no_permission_week_days: Vec<Weekday>,
    pub destination_no_permissions: String,
    pub domestic_no_permissions: String,
    pub status: FlattenStatus,
}

impl FlattenedFlight {
    /// 起飞分钟。行构造时已校验, 此处不再失败。
    pub fn std_minutes(&self) -> i32 {
        self.std.minutes().unwrap_or(0)
    }

    /// UTC 到达钟面分钟。
    pub fn sta_minutes(&self) -> i32 {
        self.sta.minutes().unwrap_or(0)
    }

    /// 指定本地周几是否为正班。
    pub fn is_real_on(&self, day: Weekday) -> bool {
        self.rsx_by_day[day.index()] == Some(Rsx::Real)
    }
}

/// 行级状态标记, 对比完成后由差异引擎填写。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenStatus {
    pub is_deleted: bool,
    pub is_new: bool,
    pub route_change: bool,
    pub week_days: [WeekDayStatus; 7],
    pub local_std: TimeStatus,
    pub local_sta: TimeStatus,
    pub utc_std: TimeStatus,
    pub utc_sta: TimeStatus,
}

/// 单个周几的状态标记。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekDayStatus {
    pub has_permission: bool,
    pub has_half_permission: bool,
    pub is_change: bool,
    pub is_deleted: bool,
}

/// 时刻列的状态标记。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeStatus {
    pub is_change: bool,
}

/// 轮挡分钟渲染为 HH:MM, 零值渲染为空串。
pub fn format_block_time(minutes: i32) -> String {
    if minutes == 0 {
        return String::new();
    }
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
