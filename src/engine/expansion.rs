// ==========================================
// 航班计划报表引擎 - 日频展开引擎
// ==========================================
// 职责: 收集编排标签, 把周班需求按逐日覆盖展开为日班次, 按 RSX 轮次过滤
// 输入: 周班需求快照 + 主数据 + 报表选项
// 输出: DailyOccurrence 集合 (不保证顺序, 排序由下游完成)
// ==========================================

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{
    AircraftType, Airport, Daytime, FlightRequirement, FlightScope, FlightType, MasterData, Rsx,
    Weekday,
};
use crate::report::error::{ReportError, ReportResult};
use crate::report::options::ProposalOptions;

// ==========================================
// 日班次 (Daily Occurrence)
// ==========================================
// 每 (需求 × 周几覆盖) 一条, 展平之后即丢弃
#[derive(Debug, Clone)]
pub struct DailyOccurrence {
    pub flight_number: String,           // 完整航班号 (含承运人前缀)
    pub departure_airport: Arc<Airport>, // 起飞机场
    pub arrival_airport: Arc<Airport>,   // 到达机场
    pub block_time: i32,                 // 轮挡时间 (分钟)
    pub day: Weekday,                    // UTC 周几
    pub std: Daytime,                    // 计划起飞时刻
    pub note: String,                    // 当日备注
    pub aircraft_type: String,           // 机型名称 (未指定为空)
    pub category: String,                // 分组类别
    pub departure_permission: bool,      // 始发站时刻许可
    pub arrival_permission: bool,        // 到达站时刻许可
    pub rsx: Rsx,                        // 班次属性
}

/// 报表轮次: 正班轮出 REAL+STB1, 备份轮出 STB2+EXT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPass {
    Real,
    Reserve,
}

// ==========================================
// DailyExpander - 日频展开引擎
// ==========================================
pub struct DailyExpander {}

impl DailyExpander {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 收集参与报表的编排标签
    ///
    /// 条件: 航线一端为基地机场, 且另一端机场的国际属性与所选航线类型一致
    ///
    /// 返回: 标签升序去重后的列表
    #[instrument(skip(self, requirements, master_data), fields(count = requirements.len()))]
    pub fn collect_labels(
        &self,
        requirements: &[&FlightRequirement],
        base_airport: &Airport,
        flight_type: FlightType,
        master_data: &MasterData,
    ) -> ReportResult<Vec<String>> {
        let wants_international = flight_type == FlightType::International;
        let mut labels: Vec<String> = Vec::new();
        for requirement in requirements {
            let departure = resolve_airport(master_data, &requirement.departure_airport_id)?;
            let arrival = resolve_airport(master_data, &requirement.arrival_airport_id)?;
            let other_side = if departure.id == base_airport.id {
                &arrival
            } else if arrival.id == base_airport.id {
                &departure
            } else {
                continue;
            };
            if other_side.international != wants_international {
                continue;
            }
            labels.push(requirement.label.clone());
        }
        labels.sort();
        labels.dedup();
        debug!(labels = labels.len(), "标签收集完成");
        Ok(labels)
    }

    /// 把一个标签下的周班需求展开为日班次
    ///
    /// 每条逐日覆盖产出一条日班次, 携带当日范围字段;
    /// 机场、机型与轮挡时间在此处校验, 不合法立即报错
    #[instrument(skip(self, requirements, master_data), fields(label = %label))]
    pub fn expand(
        &self,
        requirements: &[&FlightRequirement],
        label: &str,
        master_data: &MasterData,
    ) -> ReportResult<Vec<DailyOccurrence>> {
        let mut occurrences = Vec::new();
        for requirement in requirements.iter().filter(|fr| fr.label == label) {
            let departure = resolve_airport(master_data, &requirement.departure_airport_id)?;
            let arrival = resolve_airport(master_data, &requirement.arrival_airport_id)?;
            validate_aircraft_types(&requirement.scope, master_data)?;
            for day in &requirement.days {
                validate_block_time(&day.scope, &requirement.flight_number)?;
                validate_aircraft_types(&day.scope, master_data)?;
                let aircraft_type = match &day.aircraft_type_id {
                    Some(id) => resolve_aircraft_type(master_data, id)?.name.clone(),
                    None => String::new(),
                };
                occurrences.push(DailyOccurrence {
                    flight_number: requirement.flight_number.clone(),
                    departure_airport: departure.clone(),
                    arrival_airport: arrival.clone(),
                    block_time: day.scope.block_time,
                    day: day.day,
                    std: day.std,
                    note: day.notes.clone(),
                    aircraft_type,
                    category: requirement.category.clone(),
                    departure_permission: day.scope.origin_permission,
                    arrival_permission: day.scope.destination_permission,
                    rsx: day.scope.rsx,
                });
            }
        }
        debug!(count = occurrences.len(), "日频展开完成");
        Ok(occurrences)
    }

    /// 按报表轮次过滤 RSX
    pub fn filter_rsx(
        &self,
        occurrences: Vec<DailyOccurrence>,
        pass: ReportPass,
        options: &ProposalOptions,
    ) -> Vec<DailyOccurrence> {
        occurrences
            .into_iter()
            .filter(|occurrence| match pass {
                ReportPass::Real => {
                    (options.show_real && occurrence.rsx == Rsx::Real)
                        || (options.show_stb1 && occurrence.rsx == Rsx::Stb1)
                }
                ReportPass::Reserve => {
                    (options.show_stb2 && occurrence.rsx == Rsx::Stb2)
                        || (options.show_extra && occurrence.rsx == Rsx::Ext)
                }
            })
            .collect()
    }
}

// ==========================================
// 校验辅助
// ==========================================

fn resolve_airport(master_data: &MasterData, id: &str) -> ReportResult<Arc<Airport>> {
    master_data
        .airport(id)
        .ok_or_else(|| ReportError::UnknownAirport(id.to_string()))
}

fn resolve_aircraft_type(master_data: &MasterData, id: &str) -> ReportResult<Arc<AircraftType>> {
    master_data
        .aircraft_type(id)
        .ok_or_else(|| ReportError::UnknownAircraftType(id.to_string()))
}

fn validate_aircraft_types(scope: &FlightScope, master_data: &MasterData) -> ReportResult<()> {
    for id in &scope.aircraft_type_ids {
        resolve_aircraft_type(master_data, id)?;
    }
    Ok(())
}

// 轮挡时间上限 16 小时
fn validate_block_time(scope: &FlightScope, flight_number: &str) -> ReportResult<()> {
    if !(1..=960).contains(&scope.block_time) {
        return Err(ReportError::InvalidFlightRequirement(format!(
            "航班 {} 轮挡时间越界: {}",
            flight_number, scope.block_time
        )));
    }
    Ok(())
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================
    // 测试数据准备
    // ==========================================

    fn airport(id: &str, name: &str, international: bool) -> Airport {
        Airport {
            id: id.to_string(),
            name: name.to_string(),
            full_name: format!("{} International Airport", name),
            international,
            utc_offsets: vec![],
        }
    }

    fn master_data() -> MasterData {
        MasterData::new(
            vec![
                airport("IKA", "IKA", false),
                airport("MHD", "MHD", false),
                airport("IST", "IST", true),
                airport("DXB", "DXB", true),
            ],
            vec![AircraftType {
                id: "T-A320".to_string(),
                name: "A320".to_string(),
            }],
        )
    }

    fn scope(rsx: Rsx, block_time: i32) -> FlightScope {
        FlightScope {
            block_time,
            times: vec![],
            origin_permission: true,
            destination_permission: true,
            rsx,
            required: true,
            aircraft_type_ids: vec![],
        }
    }

    fn day(weekday: Weekday, std_minutes: i32, rsx: Rsx) -> crate::domain::DayFlightRequirement {
        crate::domain::DayFlightRequirement {
            day: weekday,
            notes: String::new(),
            scope: scope(rsx, 150),
            std: Daytime::from_minutes(std_minutes),
            aircraft_type_id: None,
        }
    }

    fn requirement(
        label: &str,
        flight_number: &str,
        departure: &str,
        arrival: &str,
        days: Vec<crate::domain::DayFlightRequirement>,
    ) -> FlightRequirement {
        FlightRequirement::new(
            label,
            "",
            flight_number,
            departure,
            arrival,
            scope(Rsx::Real, 150),
            days,
        )
    }

    fn show_all() -> ProposalOptions {
        ProposalOptions {
            base_airport_id: "IKA".to_string(),
            ..ProposalOptions::default()
        }
    }

    // ==========================================
    // 标签收集
    // ==========================================

    #[test]
    fn test_scenario_1_labels_filtered_by_base_and_type() {
        // 场景1: 只取基地一端且另一端国际属性匹配的标签
        let engine = DailyExpander::new();
        let md = master_data();
        let base = airport("IKA", "IKA", false);

        let international = requirement("IST", "W5 112", "IKA", "IST", vec![]);
        let domestic = requirement("MHD", "W5 1080", "IKA", "MHD", vec![]);
        let unrelated = requirement("XXX", "W5 999", "MHD", "IST", vec![]);
        let refs = vec![&international, &domestic, &unrelated];

        let labels = engine
            .collect_labels(&refs, &base, FlightType::International, &md)
            .unwrap();
        assert_eq!(labels, vec!["IST".to_string()], "只留国际标签");

        let labels = engine
            .collect_labels(&refs, &base, FlightType::Domestic, &md)
            .unwrap();
        assert_eq!(labels, vec!["MHD".to_string()], "只留国内标签");
    }

    #[test]
    fn test_scenario_2_labels_sorted_and_distinct() {
        // 场景2: 标签升序去重
        let engine = DailyExpander::new();
        let md = master_data();
        let base = airport("IKA", "IKA", false);

        let outbound = requirement("IST", "W5 112", "IKA", "IST", vec![]);
        let inbound = requirement("IST", "W5 113", "IST", "IKA", vec![]);
        let second = requirement("DXB", "W5 64", "IKA", "DXB", vec![]);
        let refs = vec![&outbound, &inbound, &second];

        let labels = engine
            .collect_labels(&refs, &base, FlightType::International, &md)
            .unwrap();
        assert_eq!(labels, vec!["DXB".to_string(), "IST".to_string()]);
    }

    #[test]
    fn test_scenario_3_unknown_airport_fails() {
        // 场景3: 需求引用未知机场立即报错
        let engine = DailyExpander::new();
        let md = master_data();
        let base = airport("IKA", "IKA", false);

        let bad = requirement("IST", "W5 112", "IKA", "NOWHERE", vec![]);
        let refs = vec![&bad];

        let err = engine
            .collect_labels(&refs, &base, FlightType::International, &md)
            .unwrap_err();
        assert!(matches!(err, ReportError::UnknownAirport(id) if id == "NOWHERE"));
    }

    // ==========================================
    // 日频展开
    // ==========================================

    #[test]
    fn test_scenario_4_expand_emits_one_occurrence_per_day() {
        // 场景4: 每条逐日覆盖产出一条日班次, 携带当日范围字段
        let engine = DailyExpander::new();
        let md = master_data();

        let mut saturday = day(Weekday::Saturday, 330, Rsx::Real);
        saturday.notes = "VIA BUD".to_string();
        saturday.aircraft_type_id = Some("T-A320".to_string());
        let monday = day(Weekday::Monday, 600, Rsx::Ext);
        let fr = requirement("IST", "W5 112", "IKA", "IST", vec![saturday, monday]);
        let refs = vec![&fr];

        let occurrences = engine.expand(&refs, "IST", &md).unwrap();
        assert_eq!(occurrences.len(), 2);

        assert_eq!(occurrences[0].day, Weekday::Saturday);
        assert_eq!(occurrences[0].std.minutes(), Ok(330));
        assert_eq!(occurrences[0].note, "VIA BUD");
        assert_eq!(occurrences[0].aircraft_type, "A320");
        assert_eq!(occurrences[0].rsx, Rsx::Real);
        assert_eq!(occurrences[0].departure_airport.name, "IKA");

        assert_eq!(occurrences[1].day, Weekday::Monday);
        assert_eq!(occurrences[1].rsx, Rsx::Ext);
        assert_eq!(occurrences[1].aircraft_type, "");
    }

    #[test]
    fn test_scenario_5_expand_skips_other_labels() {
        // 场景5: 只展开目标标签
        let engine = DailyExpander::new();
        let md = master_data();

        let ist = requirement("IST", "W5 112", "IKA", "IST", vec![day(Weekday::Sunday, 330, Rsx::Real)]);
        let dxb = requirement("DXB", "W5 64", "IKA", "DXB", vec![day(Weekday::Sunday, 400, Rsx::Real)]);
        let refs = vec![&ist, &dxb];

        let occurrences = engine.expand(&refs, "DXB", &md).unwrap();
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].flight_number, "W5 64");
    }

    #[test]
    fn test_scenario_6_block_time_bounds() {
        // 场景6: 轮挡时间越界报错 (0 与 961 均不合法)
        let engine = DailyExpander::new();
        let md = master_data();

        let mut bad_day = day(Weekday::Sunday, 330, Rsx::Real);
        bad_day.scope.block_time = 0;
        let fr = requirement("IST", "W5 112", "IKA", "IST", vec![bad_day]);
        let refs = vec![&fr];
        let err = engine.expand(&refs, "IST", &md).unwrap_err();
        assert!(matches!(err, ReportError::InvalidFlightRequirement(_)));

        let mut bad_day = day(Weekday::Sunday, 330, Rsx::Real);
        bad_day.scope.block_time = 961;
        let fr = requirement("IST", "W5 112", "IKA", "IST", vec![bad_day]);
        let refs = vec![&fr];
        assert!(engine.expand(&refs, "IST", &md).is_err());
    }

    #[test]
    fn test_scenario_7_unknown_aircraft_type_fails() {
        // 场景7: 未知机型报错
        let engine = DailyExpander::new();
        let md = master_data();

        let mut bad_day = day(Weekday::Sunday, 330, Rsx::Real);
        bad_day.aircraft_type_id = Some("T-MISSING".to_string());
        let fr = requirement("IST", "W5 112", "IKA", "IST", vec![bad_day]);
        let refs = vec![&fr];

        let err = engine.expand(&refs, "IST", &md).unwrap_err();
        assert!(matches!(err, ReportError::UnknownAircraftType(id) if id == "T-MISSING"));
    }

    // ==========================================
    // RSX 过滤
    // ==========================================

    #[test]
    fn test_scenario_8_rsx_filter_by_pass() {
        // 场景8: 正班轮留 REAL+STB1, 备份轮留 STB2+EXT
        let engine = DailyExpander::new();
        let md = master_data();

        let fr = requirement(
            "IST",
            "W5 112",
            "IKA",
            "IST",
            vec![
                day(Weekday::Saturday, 330, Rsx::Real),
                day(Weekday::Sunday, 330, Rsx::Stb1),
                day(Weekday::Monday, 330, Rsx::Stb2),
                day(Weekday::Tuesday, 330, Rsx::Ext),
            ],
        );
        let refs = vec![&fr];
        let occurrences = engine.expand(&refs, "IST", &md).unwrap();

        let real = engine.filter_rsx(occurrences.clone(), ReportPass::Real, &show_all());
        assert_eq!(real.len(), 2);
        assert!(real.iter().all(|o| o.rsx == Rsx::Real || o.rsx == Rsx::Stb1));

        let reserve = engine.filter_rsx(occurrences, ReportPass::Reserve, &show_all());
        assert_eq!(reserve.len(), 2);
        assert!(reserve.iter().all(|o| o.rsx == Rsx::Stb2 || o.rsx == Rsx::Ext));
    }

    #[test]
    fn test_scenario_9_rsx_filter_honors_visibility_flags() {
        // 场景9: 可见性开关逐项关闭
        let engine = DailyExpander::new();
        let md = master_data();

        let fr = requirement(
            "IST",
            "W5 112",
            "IKA",
            "IST",
            vec![
                day(Weekday::Saturday, 330, Rsx::Real),
                day(Weekday::Sunday, 330, Rsx::Stb1),
            ],
        );
        let refs = vec![&fr];
        let occurrences = engine.expand(&refs, "IST", &md).unwrap();

        let mut options = show_all();
        options.show_stb1 = false;
        let filtered = engine.filter_rsx(occurrences, ReportPass::Real, &options);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].rsx, Rsx::Real);
    }
}
