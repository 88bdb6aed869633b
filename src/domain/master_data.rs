// ==========================================
// 航班计划报表引擎 - 主数据上下文
// ==========================================
// 机场与机型按 ID 索引, 查询方以显式注入方式持有,
// 不使用全局单例
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use super::airport::{AircraftType, Airport};

#[derive(Debug, Clone)]
pub struct MasterData {
    airports: HashMap<String, Arc<Airport>>,
    aircraft_types: HashMap<String, Arc<AircraftType>>,
}

/// JSON 交换格式 (与主数据服务的导出结构一致)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MasterDataModel {
    airports: Vec<Airport>,
    aircraft_types: Vec<AircraftType>,
}

impl MasterData {
    pub fn new(airports: Vec<Airport>, aircraft_types: Vec<AircraftType>) -> MasterData {
        MasterData {
            airports: airports
                .into_iter()
                .map(|airport| (airport.id.clone(), Arc::new(airport)))
                .collect(),
            aircraft_types: aircraft_types
                .into_iter()
                .map(|aircraft_type| (aircraft_type.id.clone(), Arc::new(aircraft_type)))
                .collect(),
        }
    }

    /// 从主数据 JSON 导出构造
    pub fn from_json(text: &str) -> serde_json::Result<MasterData> {
        let model: MasterDataModel = serde_json::from_str(text)?;
        Ok(MasterData::new(model.airports, model.aircraft_types))
    }

    pub fn airport(&self, id: &str) -> Option<Arc<Airport>> {
        self.airports.get(id).cloned()
    }

    pub fn aircraft_type(&self, id: &str) -> Option<Arc<AircraftType>> {
        self.aircraft_types.get(id).cloned()
    }

    /// 按 IATA 三字码查机场 (中转报表选项按三字码给出)
    pub fn airport_by_name(&self, name: &str) -> Option<Arc<Airport>> {
        self.airports
            .values()
            .find(|airport| airport.name == name)
            .cloned()
    }
}
