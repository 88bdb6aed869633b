// ==========================================
// 航班计划报表引擎 - 报表层
// ==========================================
// 职责: 选项校验、引擎编排与报表装配
// 红线: 报表层不改引擎输出的行内语义, 只做排序、分组与文案
// ==========================================

pub mod connections;
pub mod error;
pub mod options;
pub mod proposal;

// 重导出报表入口
pub use connections::{
    ConnectionCountCell, ConnectionCountRow, ConnectionTableRow, ConnectionsReport,
    ConnectionsReportEngine, TimeColumn,
};
pub use error::{ReportError, ReportResult};
pub use options::{ConnectionsOptions, ProposalOptions};
pub use proposal::{CategoryGroup, ProposalReport, ProposalReportEngine};
