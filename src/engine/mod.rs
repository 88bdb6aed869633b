// ==========================================
// 航班计划报表引擎 - 引擎层
// ==========================================
// 职责: 实现方案报表的展开、压平、衔接、排序与对比规则
// 红线: 引擎只做纯计算, 不碰 IO; 所有集合按输入顺序稳定处理
// ==========================================

pub mod connection;
pub mod diff;
pub mod expansion;
pub mod flatten;
pub mod route_sort;

// 重导出核心引擎
pub use connection::{ConnectionGraph, ConnectionLinker};
pub use diff::DiffEngine;
pub use expansion::{DailyExpander, DailyOccurrence, ReportPass};
pub use flatten::{
    format_block_time, normalize_flight_number, FlattenEngine, FlattenStatus, FlattenedFlight,
    TimeStatus, WeekDayStatus, CIRCLE, EMPTY_CIRCLE, LEFT_HALF_CIRCLE, RIGHT_HALF_CIRCLE,
};
pub use route_sort::RouteSorter;
