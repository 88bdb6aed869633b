// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供报表测试共用的主数据夹具与计划版本构造器
// 夹具机场偏移时段覆盖整个 2019 年, 航季取 2019-06-22 ~ 2019-07-20,
// 基准日即航季中点 2019-07-06 (周六)
// ==========================================
#![allow(dead_code)]

use chrono::{TimeZone, Utc};

use preplan_reporting::{
    DayFlightRequirement, Daytime, FlightRequirement, FlightScope, FlightType, MasterData,
    Preplan, ProposalOptions, Rsx, Weekday,
};

/// 从夹具 JSON 构造主数据 (IKA/MHD 国内 + IST/DXB/PEK/BKK 国际 + 两个机型)
pub fn fixture_master_data() -> MasterData {
    MasterData::from_json(include_str!("fixtures/master_data.json"))
        .expect("夹具主数据应能解析")
}

/// 周默认范围: 双向许可齐全的正班
pub fn scope(rsx: Rsx, block_time: i32) -> FlightScope {
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

/// 逐日覆盖: 指定周几与起飞分钟
pub fn day(weekday: Weekday, std_minutes: i32, rsx: Rsx, block_time: i32) -> DayFlightRequirement {
    DayFlightRequirement {
        day: weekday,
        notes: String::new(),
        scope: scope(rsx, block_time),
        std: Daytime::from_minutes(std_minutes),
        aircraft_type_id: None,
    }
}

/// 周班需求: 默认类别为空
pub fn requirement(
    label: &str,
    flight_number: &str,
    departure_id: &str,
    arrival_id: &str,
    days: Vec<DayFlightRequirement>,
) -> FlightRequirement {
    FlightRequirement::new(
        label,
        "",
        flight_number,
        departure_id,
        arrival_id,
        scope(Rsx::Real, 150),
        days,
    )
}

/// 计划版本: 航季 2019-06-22 ~ 2019-07-20, 基准日落在周六
pub fn preplan(name: &str, requirements: Vec<FlightRequirement>) -> Preplan {
    Preplan::new(
        name,
        Utc.with_ymd_and_hms(2019, 6, 22, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2019, 7, 20, 0, 0, 0).unwrap(),
        requirements,
    )
}

/// 方案报表选项: 基地 IKA, 国际航线, 四类班次全开
pub fn proposal_options() -> ProposalOptions {
    ProposalOptions {
        base_airport_id: "A-IKA".to_string(),
        flight_type: FlightType::International,
        ..ProposalOptions::default()
    }
}
