// ==========================================
// 航班计划报表引擎 - 计划版本 (Preplan)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::flight::FlightRequirement;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preplan {
    pub id: String,                              // 计划ID
    pub name: String,                            // 计划名称
    pub start_date: DateTime<Utc>,               // 航季起始
    pub end_date: DateTime<Utc>,                 // 航季截止
    pub flight_requirements: Vec<FlightRequirement>, // 周班需求集
}

impl Preplan {
    pub fn new(
        name: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        flight_requirements: Vec<FlightRequirement>,
    ) -> Preplan {
        Preplan {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            start_date,
            end_date,
            flight_requirements,
        }
    }

    /// 报表基准日: 航季起止的中点
    pub fn base_date(&self) -> DateTime<Utc> {
        self.start_date + (self.end_date - self.start_date) / 2
    }

    /// 参与报表的需求 (剔除 ignored)
    pub fn active_requirements(&self) -> impl Iterator<Item = &FlightRequirement> {
        self.flight_requirements.iter().filter(|fr| !fr.ignored)
    }
}
