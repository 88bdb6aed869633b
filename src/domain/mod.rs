// ==========================================
// 航班计划报表引擎 - 领域模型层
// ==========================================
// 职责: 定义周班需求、时刻、主数据等领域实体
// 红线: 不含报表编排逻辑, 不含引擎逻辑
// ==========================================

pub mod airport;
pub mod daytime;
pub mod flight;
pub mod master_data;
pub mod preplan;
pub mod types;

// 重导出核心类型
pub use airport::{AircraftType, Airport, UtcOffsetPeriod};
pub use daytime::{Daytime, DaytimeError, TimeFormat};
pub use flight::{DayFlightRequirement, FlightRequirement, FlightScope, TimeWindow};
pub use master_data::MasterData;
pub use preplan::Preplan;
pub use types::{FlightType, Rsx, Weekday};
