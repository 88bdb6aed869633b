// ==========================================
// 航班计划报表引擎 - 核心库
// ==========================================
// 系统定位: 进程内报表计算库, 供计划编排前端的报表层调用
// 输入为只读的计划快照与主数据, 输出为显示就绪的报表行集
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 日志系统
pub mod logging;

// 报表层 - 编排与装配
pub mod report;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AircraftType, Airport, DayFlightRequirement, Daytime, DaytimeError, FlightRequirement,
    FlightScope, FlightType, MasterData, Preplan, Rsx, TimeFormat, UtcOffsetPeriod, Weekday,
};

// 引擎
pub use engine::{
    ConnectionGraph, ConnectionLinker, DailyExpander, DiffEngine, FlattenEngine, FlattenStatus,
    FlattenedFlight, RouteSorter,
};

// 报表
pub use report::{
    CategoryGroup, ConnectionsOptions, ConnectionsReport, ConnectionsReportEngine, ProposalOptions,
    ProposalReport, ProposalReportEngine, ReportError, ReportResult,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "航班计划报表引擎";

// ==========================================
// 预编译检查
// ==========================================
