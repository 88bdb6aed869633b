// ==========================================
// 方案报表集成测试
// ==========================================
// 测试范围: 展开 → 压平 → 衔接 → 航路排序 → 许可说明/频率 → 分组
// 数据: 夹具主数据 (基地 IKA), 航季中点 2019-07-06 为基准日
// ==========================================

mod test_helpers;

use preplan_reporting::engine::{CIRCLE, LEFT_HALF_CIRCLE};
use preplan_reporting::{FlightType, ProposalReportEngine, ReportError, Rsx, Weekday};
use test_helpers::*;

// ==========================================
// 场景1: 往返对的完整流水线
// ==========================================

#[test]
fn test_scenario_1_round_trip_pipeline() {
    // 往返两班各飞周六/周一, 应压平为两行并按航路排序
    let engine = ProposalReportEngine::new();
    let md = fixture_master_data();
    let plan = preplan(
        "S19",
        vec![
            requirement(
                "IST",
                "W5 112",
                "A-IKA",
                "A-IST",
                vec![
                    day(Weekday::Saturday, 330, Rsx::Real, 150),
                    day(Weekday::Monday, 330, Rsx::Real, 150),
                ],
            ),
            requirement(
                "IST",
                "W5 113",
                "A-IST",
                "A-IKA",
                vec![
                    day(Weekday::Saturday, 700, Rsx::Real, 150),
                    day(Weekday::Monday, 700, Rsx::Real, 150),
                ],
            ),
        ],
    );

    let report = engine.generate(&plan, &md, &proposal_options()).unwrap();

    assert_eq!(report.flights.len(), 2);
    let outbound = &report.flights[0];
    let inbound = &report.flights[1];

    // 基地出港行在前
    assert_eq!(outbound.flight_number, "112");
    assert_eq!(outbound.route, "IKA–IST");
    assert_eq!(inbound.flight_number, "113");
    assert_eq!(inbound.route, "IST–IKA");

    // 四组时刻显示: 05:30 UTC 起飞, IKA +4:30 / IST +3:00
    assert_eq!(outbound.utc_std, "0530");
    assert_eq!(outbound.local_std, "1000");
    assert_eq!(outbound.utc_sta, "0800");
    assert_eq!(outbound.local_sta, "1100");

    // 周几与符号
    assert_eq!(outbound.days, vec![Weekday::Saturday, Weekday::Monday]);
    assert_eq!(outbound.day_chars[Weekday::Saturday.index()], CIRCLE);
    assert_eq!(outbound.day_chars[Weekday::Sunday.index()], "");

    // 父航线为标签组内航线按序拼接
    assert_eq!(outbound.parent_route, "IKA–IST,IST–IKA");
    assert_eq!(inbound.parent_route, "IKA–IST,IST–IKA");

    // 周频按往返对算半班: 4 个正班日 → "2", 只写在组内首行
    assert_eq!(outbound.frequency, "2");
    assert_eq!(inbound.frequency, "");

    // 许可齐全
    assert_eq!(outbound.domestic_no_permissions, "OK");
    assert_eq!(outbound.destination_no_permissions, "OK");
}

// ==========================================
// 场景2: 同键合并与许可清单
// ==========================================

#[test]
fn test_scenario_2_same_key_merge_records_no_permission_side() {
    // 同航线同时刻的两个正班合并为一行, 缺始发许可的周几记国内侧
    let engine = ProposalReportEngine::new();
    let md = fixture_master_data();

    let mut monday = day(Weekday::Monday, 330, Rsx::Real, 150);
    monday.scope.origin_permission = false;
    let plan = preplan(
        "S19",
        vec![requirement(
            "IST",
            "W5 112",
            "A-IKA",
            "A-IST",
            vec![day(Weekday::Saturday, 330, Rsx::Real, 150), monday],
        )],
    );

    let report = engine.generate(&plan, &md, &proposal_options()).unwrap();

    assert_eq!(report.flights.len(), 1, "同键应合并为一行");
    let flight = &report.flights[0];
    assert_eq!(flight.real_frequency, 2);
    assert_eq!(flight.domestic_no_permission_week_days, vec![Weekday::Monday]);
    assert_eq!(flight.domestic_no_permissions, "NOT OK for: Mon");
    assert_eq!(flight.destination_no_permissions, "OK");
    assert_eq!(flight.day_chars[Weekday::Saturday.index()], CIRCLE);
    assert_eq!(flight.day_chars[Weekday::Monday.index()], LEFT_HALF_CIRCLE);

    // 状态复位: 周一半许可
    let status = &flight.status;
    assert!(status.week_days[Weekday::Saturday.index()].has_permission);
    assert!(!status.week_days[Weekday::Monday.index()].has_permission);
    assert!(status.week_days[Weekday::Monday.index()].has_half_permission);
}

// ==========================================
// 场景3: 班次频率字符串
// ==========================================

#[test]
fn test_scenario_3_frequency_string_joins_nonzero_components() {
    // 6 个正班日 + 2 个一级备份日 → "3+1"
    let engine = ProposalReportEngine::new();
    let md = fixture_master_data();
    let plan = preplan(
        "S19",
        vec![
            requirement(
                "IST",
                "W5 112",
                "A-IKA",
                "A-IST",
                vec![
                    day(Weekday::Saturday, 330, Rsx::Real, 150),
                    day(Weekday::Sunday, 330, Rsx::Real, 150),
                    day(Weekday::Monday, 330, Rsx::Real, 150),
                    day(Weekday::Tuesday, 330, Rsx::Stb1, 150),
                ],
            ),
            requirement(
                "IST",
                "W5 113",
                "A-IST",
                "A-IKA",
                vec![
                    day(Weekday::Saturday, 700, Rsx::Real, 150),
                    day(Weekday::Sunday, 700, Rsx::Real, 150),
                    day(Weekday::Monday, 700, Rsx::Real, 150),
                    day(Weekday::Wednesday, 700, Rsx::Stb1, 150),
                ],
            ),
        ],
    );

    let report = engine.generate(&plan, &md, &proposal_options()).unwrap();

    assert_eq!(report.flights.len(), 2);
    assert_eq!(report.flights[0].frequency, "3+1");
    assert_eq!(report.flights[1].frequency, "");
    assert_eq!(report.flights[0].real_frequency, 3);
    assert_eq!(report.flights[0].standby_frequency, 1);
}

// ==========================================
// 场景4: 航路排序以基地出港开头
// ==========================================

#[test]
fn test_scenario_4_route_order_starts_from_base_departure() {
    // 回程起飞更早, 按时刻排序在前, 但航路排序仍以基地出港开头
    let engine = ProposalReportEngine::new();
    let md = fixture_master_data();
    let plan = preplan(
        "S19",
        vec![
            requirement(
                "IST",
                "W5 113",
                "A-IST",
                "A-IKA",
                vec![day(Weekday::Saturday, 200, Rsx::Real, 150)],
            ),
            requirement(
                "IST",
                "W5 112",
                "A-IKA",
                "A-IST",
                vec![day(Weekday::Saturday, 330, Rsx::Real, 150)],
            ),
        ],
    );

    let report = engine.generate(&plan, &md, &proposal_options()).unwrap();

    assert_eq!(report.flights.len(), 2);
    assert_eq!(report.flights[0].flight_number, "112", "基地出港行开头");
    assert_eq!(report.flights[1].flight_number, "113");
}

// ==========================================
// 场景5: 错误传播
// ==========================================

#[test]
fn test_scenario_5_error_propagation() {
    let engine = ProposalReportEngine::new();
    let md = fixture_master_data();

    // 需求引用未知机场: 整组报表失败
    let plan = preplan(
        "S19",
        vec![requirement(
            "IST",
            "W5 112",
            "A-IKA",
            "A-NOWHERE",
            vec![day(Weekday::Saturday, 330, Rsx::Real, 150)],
        )],
    );
    let err = engine.generate(&plan, &md, &proposal_options()).unwrap_err();
    assert!(matches!(err, ReportError::UnknownAirport(id) if id == "A-NOWHERE"));

    // 基地机场未指定: 选项校验报错, 不再静默输出空报表
    let plan = preplan("S19", vec![]);
    let mut options = proposal_options();
    options.base_airport_id = String::new();
    let err = engine.generate(&plan, &md, &options).unwrap_err();
    assert!(matches!(err, ReportError::InvalidOptions(_)));

    // 基地机场查不到: 主数据错误
    let mut options = proposal_options();
    options.base_airport_id = "A-GONE".to_string();
    let err = engine.generate(&plan, &md, &options).unwrap_err();
    assert!(matches!(err, ReportError::UnknownAirport(id) if id == "A-GONE"));
}

// ==========================================
// 场景6: 类别分组与正班行数
// ==========================================

#[test]
fn test_scenario_6_category_groups_mark_real_flight_count() {
    // 正班轮与备份轮同类别时并组, 记录正班行数
    let engine = ProposalReportEngine::new();
    let md = fixture_master_data();
    let plan = preplan(
        "S19",
        vec![
            requirement(
                "IST",
                "W5 112",
                "A-IKA",
                "A-IST",
                vec![day(Weekday::Saturday, 330, Rsx::Real, 150)],
            ),
            requirement(
                "IST",
                "W5 118",
                "A-IKA",
                "A-IST",
                vec![day(Weekday::Tuesday, 900, Rsx::Ext, 150)],
            ),
        ],
    );

    let report = engine.generate(&plan, &md, &proposal_options()).unwrap();

    assert_eq!(report.flights.len(), 2, "正班轮一行 + 备份轮一行");
    assert_eq!(report.flights[0].flight_number, "112");
    assert_eq!(report.flights[1].flight_number, "118");
    assert_eq!(report.flights[1].day_chars[Weekday::Tuesday.index()], "EXT");

    assert_eq!(report.groups.len(), 1);
    let group = &report.groups[0];
    assert_eq!(group.category, "");
    assert_eq!(group.count_of_real_flight, Some(1), "正班行数即备份行起点");
    assert_eq!(group.flights.len(), 2);
}

// ==========================================
// 场景7: 航线类型筛选标签
// ==========================================

#[test]
fn test_scenario_7_flight_type_selects_labels() {
    // 国际报表不出国内标签, 反之亦然
    let engine = ProposalReportEngine::new();
    let md = fixture_master_data();
    let plan = preplan(
        "S19",
        vec![
            requirement(
                "IST",
                "W5 112",
                "A-IKA",
                "A-IST",
                vec![day(Weekday::Saturday, 330, Rsx::Real, 150)],
            ),
            requirement(
                "MHD",
                "W5 1080",
                "A-IKA",
                "A-MHD",
                vec![day(Weekday::Saturday, 600, Rsx::Real, 150)],
            ),
        ],
    );

    let international = engine.generate(&plan, &md, &proposal_options()).unwrap();
    assert_eq!(international.flights.len(), 1);
    assert_eq!(international.flights[0].label, "IST");

    let mut options = proposal_options();
    options.flight_type = FlightType::Domestic;
    let domestic = engine.generate(&plan, &md, &options).unwrap();
    assert_eq!(domestic.flights.len(), 1);
    assert_eq!(domestic.flights[0].label, "MHD");
}

// ==========================================
// 场景8: 生成结果确定性
// ==========================================

#[test]
fn test_scenario_8_generation_is_deterministic() {
    // 同一快照重复生成, 行序与行内字段一致 (id 除外)
    let engine = ProposalReportEngine::new();
    let md = fixture_master_data();
    let plan = preplan(
        "S19",
        vec![
            requirement(
                "IST",
                "W5 112",
                "A-IKA",
                "A-IST",
                vec![
                    day(Weekday::Saturday, 330, Rsx::Real, 150),
                    day(Weekday::Monday, 330, Rsx::Stb1, 150),
                ],
            ),
            requirement(
                "DXB",
                "W5 64",
                "A-IKA",
                "A-DXB",
                vec![day(Weekday::Sunday, 420, Rsx::Real, 150)],
            ),
        ],
    );

    let first = engine.generate(&plan, &md, &proposal_options()).unwrap();
    let second = engine.generate(&plan, &md, &proposal_options()).unwrap();

    assert_eq!(first.flights.len(), second.flights.len());
    for (a, b) in first.flights.iter().zip(second.flights.iter()) {
        assert_eq!(a.flight_number, b.flight_number);
        assert_eq!(a.days, b.days);
        assert_eq!(a.utc_days, b.utc_days);
        assert_eq!(a.local_std, b.local_std);
        assert_eq!(a.frequency, b.frequency);
        assert_eq!(a.day_chars, b.day_chars);
    }
}
