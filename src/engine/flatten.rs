// ==========================================
// 航班计划报表引擎 - 展平引擎
// ==========================================
// 职责: 将同航线同时刻的日班次合并为周视图航班行
// 输入: 一个标签组的日班次集合 + 基地机场 + 基准日
// 输出: FlattenedFlight 集合 (含周几符号与许可清单)
// ==========================================
// 注: 合并键为 (到达机场, 起飞机场, 轮挡, 规范化航班号, 起飞分钟)
// ==========================================

mod core;
mod model;


pub use core::{normalize_flight_number, FlattenEngine};
pub use model::{
    format_block_time, FlattenStatus, FlattenedFlight, TimeStatus, WeekDayStatus, CIRCLE,
    EMPTY_CIRCLE, LEFT_HALF_CIRCLE, RIGHT_HALF_CIRCLE,
};
