// ==========================================
// 航班计划报表引擎 - 报表选项
// ==========================================
// 职责: 两类报表的输入参数与参数校验
// 红线: 选项缺失即报错, 不再静默输出空报表
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::FlightType;

use super::error::{ReportError, ReportResult};

// ==========================================
// 计划表选项 (Proposal Options)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalOptions {
    /// 基地机场ID (必填)
    pub base_airport_id: String,

    /// 航线类型 (决定标签筛选范围)
    pub flight_type: FlightType,

    /// 是否出正班 (REAL)
    #[serde(default = "default_true")]
    pub show_real: bool,

    /// 是否出一级备份 (STB1)
    #[serde(default = "default_true")]
    pub show_stb1: bool,

    /// 是否出二级备份 (STB2)
    #[serde(default = "default_true")]
    pub show_stb2: bool,

    /// 是否出加班 (EXT)
    #[serde(default = "default_true")]
    pub show_extra: bool,
}

impl Default for ProposalOptions {
    fn default() -> ProposalOptions {
        ProposalOptions {
            base_airport_id: String::new(),
            flight_type: FlightType::International,
            show_real: true,
            show_stb1: true,
            show_stb2: true,
            show_extra: true,
        }
    }
}

impl ProposalOptions {
    pub fn validate(&self) -> ReportResult<()> {
        if self.base_airport_id.is_empty() {
            return Err(ReportError::InvalidOptions("基地机场未指定".into()));
        }
        Ok(())
    }
}

// ==========================================
// 中转衔接表选项 (Connections Options)
// ==========================================
// 机场以 IATA 三字码给出, 主数据中不存在的三字码不出列
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsOptions {
    /// 东向机场三字码
    #[serde(default = "default_east_airports")]
    pub east_airport_codes: Vec<String>,

    /// 西向机场三字码
    #[serde(default = "default_west_airports")]
    pub west_airport_codes: Vec<String>,

    /// 最小衔接时间 (小时)
    #[serde(default = "default_min_connection_time")]
    pub min_connection_time_hours: i32,

    /// 最大衔接时间 (小时)
    #[serde(default = "default_max_connection_time")]
    pub max_connection_time_hours: i32,
}

fn default_true() -> bool {
    true
}

fn default_east_airports() -> Vec<String> {
    ["BKK", "CAN", "DEL", "BOM", "KUL", "LHE", "PEK", "PVG"]
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_west_airports() -> Vec<String> {
    ["BCN", "DXB", "ESB", "EVN", "GYD", "IST", "MXP", "VKO"]
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_min_connection_time() -> i32 {
    1
}

fn default_max_connection_time() -> i32 {
    5
}

impl Default for ConnectionsOptions {
    fn default() -> ConnectionsOptions {
        ConnectionsOptions {
            east_airport_codes: default_east_airports(),
            west_airport_codes: default_west_airports(),
            min_connection_time_hours: default_min_connection_time(),
            max_connection_time_hours: default_max_connection_time(),
        }
    }
}

impl ConnectionsOptions {
    pub fn validate(&self) -> ReportResult<()> {
        if self.min_connection_time_hours <= 0 || self.max_connection_time_hours <= 0 {
            return Err(ReportError::InvalidOptions("衔接时间必须为正数".into()));
        }
        if self.min_connection_time_hours >= self.max_connection_time_hours {
            return Err(ReportError::InvalidOptions(
                "最小衔接时间必须小于最大衔接时间".into(),
            ));
        }
        Ok(())
    }
}
