// ==========================================
// 航班计划报表引擎 - 报表层错误类型
// ==========================================
// 职责: 定义报表生成过程的错误类型
// 所有错误同步向上传播, 不做重试
// ==========================================

use thiserror::Error;

use crate::domain::DaytimeError;

#[derive(Error, Debug)]
pub enum ReportError {
    // ==========================================
    // 时刻错误
    // ==========================================
    // 保留原文错误消息 "This daytime is invalid."
    #[error(transparent)]
    InvalidDaytime(#[from] DaytimeError),

    // ==========================================
    // 主数据错误
    // ==========================================
    #[error("未知机场: {0}")]
    UnknownAirport(String),

    #[error("未知机型: {0}")]
    UnknownAircraftType(String),

    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("周班需求不合法: {0}")]
    InvalidFlightRequirement(String),

    #[error("报表选项不合法: {0}")]
    InvalidOptions(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
