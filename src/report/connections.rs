// ==========================================
// 航班计划报表引擎 - 中转衔接报表 (Connections Report)
// ==========================================
// 职责: 统计东西向机场经基地中转的衔接机会, 产出衔接数矩阵与逐日时刻表
// 输入: 计划版本 + 主数据 + 衔接选项 (东西向三字码、衔接时间窗)
// 注: 选项里主数据查不到的三字码不出列, 不报错
// ==========================================

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::{Airport, MasterData, Preplan, Weekday};

use super::error::{ReportError, ReportResult};
use super::options::ConnectionsOptions;

// ==========================================
// 输出模型
// ==========================================

/// 衔接数单元: 一个西向机场与所在行东向机场的双向衔接天数。
#[derive(Debug, Clone)]
pub struct ConnectionCountCell {
    pub west_airport: String,
    pub east_to_west: u32,
    pub west_to_east: u32,
}

/// 衔接数矩阵的一行, 对应一个东向机场。
#[derive(Debug, Clone)]
pub struct ConnectionCountRow {
    pub east_airport: String,
    pub cells: Vec<ConnectionCountCell>,
}

/// 时刻列: 一个机场在当天的时刻清单, 多行以 \r\n 连接。
#[derive(Debug, Clone)]
pub struct TimeColumn {
    pub airport: String,
    pub times: String,
}

/// 逐日时刻表的一行, 对应一个周几。
#[derive(Debug, Clone)]
pub struct ConnectionTableRow {
    pub day: String,
    pub east_arrivals: Vec<TimeColumn>,
    pub east_departures: Vec<TimeColumn>,
    /// 西向机场列: 出发与到达时刻按行配对为 "std-sta"
    pub west_connections: Vec<TimeColumn>,
}

#[derive(Debug, Clone)]
pub struct ConnectionsReport {
    pub counts: Vec<ConnectionCountRow>,
    pub table: Vec<ConnectionTableRow>,
}

// ==========================================
// 内部工作模型
// ==========================================

// 日航段: 需求 × 逐日覆盖, 只取衔接所需字段
struct ConnectionLeg {
    departure_airport: Arc<Airport>,
    arrival_airport: Arc<Airport>,
    day: Weekday,
    std_minutes: i32,
    block_time: i32,
}

impl ConnectionLeg {
    // 到达所在周几: 起飞分钟 + 轮挡越过午夜才进位 (恰好 1440 不进位)
    fn arrival_day(&self) -> Weekday {
        if self.std_minutes + self.block_time > 1440 {
            self.day.offset(1)
        } else {
            self.day
        }
    }

    // 回绕后的到达钟面分钟
    fn wrapped_sta(&self) -> i32 {
        (self.std_minutes + self.block_time) % 1440
    }
}

// 单个周几的航段分桶 (下标指向航段表)
#[derive(Default)]
struct DayBucket {
    east_arrivals: Vec<usize>,    // 东向机场起飞、按到达周几入桶
    east_departures: Vec<usize>,  // 飞往东向机场、按起飞周几入桶
    west_arrivals: Vec<usize>,
    west_departures: Vec<usize>,
}

// ==========================================
// ConnectionsReportEngine - 中转衔接报表引擎
// ==========================================

pub struct ConnectionsReportEngine {}

impl ConnectionsReportEngine {
    pub fn new() -> Self {
        ConnectionsReportEngine {}
    }

    /// 生成中转衔接报表
    ///
    /// # 参数
    /// - preplan: 计划版本
    /// - master_data: 机场与机型主数据
    /// - options: 衔接选项
    ///
    /// # 返回
    /// 衔接数矩阵与逐日时刻表
    #[instrument(skip(self, preplan, master_data, options), fields(preplan = %preplan.name))]
    pub fn generate(
        &self,
        preplan: &Preplan,
        master_data: &MasterData,
        options: &ConnectionsOptions,
    ) -> ReportResult<ConnectionsReport> {
        options.validate()?;
        let east = resolve_airports(&options.east_airport_codes, master_data);
        let west = resolve_airports(&options.west_airport_codes, master_data);

        let legs = build_legs(preplan, master_data)?;
        info!(
            leg_count = legs.len(),
            east_count = east.len(),
            west_count = west.len(),
            "开始生成中转衔接报表"
        );

        let buckets = bucket_per_day(&legs, &east, &west);
        let counts = self.count_matrix(&legs, &buckets, &east, &west, options);
        let table = self.table_rows(&legs, &buckets, &east, &west);

        debug!(count_rows = counts.len(), table_rows = table.len(), "中转衔接报表生成完成");
        Ok(ConnectionsReport { counts, table })
    }

    // ==========================================
    // 衔接数矩阵
    // ==========================================

    fn count_matrix(
        &self,
        legs: &[ConnectionLeg],
        buckets: &[DayBucket; 7],
        east: &[Arc<Airport>],
        west: &[Arc<Airport>],
        options: &ConnectionsOptions,
    ) -> Vec<ConnectionCountRow> {
        east.iter()
            .map(|east_airport| ConnectionCountRow {
                east_airport: east_airport.name.clone(),
                cells: west
                    .iter()
                    .map(|west_airport| ConnectionCountCell {
                        west_airport: west_airport.name.clone(),
                        east_to_west: count_connection_days(
                            legs,
                            buckets,
                            |bucket| (&bucket.east_arrivals, &bucket.west_departures),
                            east_airport,
                            west_airport,
                            options,
                        ),
                        west_to_east: count_connection_days(
                            legs,
                            buckets,
                            |bucket| (&bucket.west_arrivals, &bucket.east_departures),
                            west_airport,
                            east_airport,
                            options,
                        ),
                    })
                    .collect(),
            })
            .collect()
    }

    // ==========================================
    // 逐日时刻表
    // ==========================================

    fn table_rows(
        &self,
        legs: &[ConnectionLeg],
        buckets: &[DayBucket; 7],
        east: &[Arc<Airport>],
        west: &[Arc<Airport>],
    ) -> Vec<ConnectionTableRow> {
        Weekday::ALL
            .iter()
            .map(|&day| {
                let bucket = &buckets[day.index()];
                let mut row = ConnectionTableRow {
                    day: day.short_name().to_uppercase(),
                    east_arrivals: Vec::new(),
                    east_departures: Vec::new(),
                    west_connections: Vec::new(),
                };

                for airport in east {
                    let mut stas: Vec<i32> = bucket
                        .east_arrivals
                        .iter()
                        .filter(|&&index| legs[index].departure_airport.id == airport.id)
                        .map(|&index| legs[index].std_minutes + legs[index].block_time)
                        .collect();
                    if stas.is_empty() {
                        continue;
                    }
                    stas.sort_unstable();
                    row.east_arrivals.push(TimeColumn {
                        airport: airport.name.clone(),
                        times: join_times(&stas),
                    });
                }

                for airport in east {
                    let mut stds: Vec<i32> = bucket
                        .east_departures
                        .iter()
                        .filter(|&&index| legs[index].arrival_airport.id == airport.id)
                        .map(|&index| legs[index].std_minutes)
                        .collect();
                    if stds.is_empty() {
                        continue;
                    }
                    stds.sort_unstable();
                    row.east_departures.push(TimeColumn {
                        airport: airport.name.clone(),
                        times: join_times(&stds),
                    });
                }

                for airport in west {
                    let mut stas: Vec<i32> = bucket
                        .west_arrivals
                        .iter()
                        .filter(|&&index| legs[index].departure_airport.id == airport.id)
                        .map(|&index| legs[index].std_minutes + legs[index].block_time)
                        .collect();
                    let mut stds: Vec<i32> = bucket
                        .west_departures
                        .iter()
                        .filter(|&&index| legs[index].arrival_airport.id == airport.id)
                        .map(|&index| legs[index].std_minutes)
                        .collect();
                    if stas.is_empty() && stds.is_empty() {
                        continue;
                    }
                    stas.sort_unstable();
                    stds.sort_unstable();
                    let pairs: Vec<String> = (0..stas.len().max(stds.len()))
                        .map(|i| {
                            format!(
                                "{}-{}",
                                format_hhmm(stds.get(i).copied().unwrap_or(0)),
                                format_hhmm(stas.get(i).copied().unwrap_or(0))
                            )
                        })
                        .collect();
                    row.west_connections.push(TimeColumn {
                        airport: airport.name.clone(),
                        times: pairs.join("\r\n"),
                    });
                }

                row
            })
            .collect()
    }
}

// ==========================================
// 分桶与统计
// ==========================================

/// 选项三字码解析为机场, 查不到的静默跳过
fn resolve_airports(codes: &[String], master_data: &MasterData) -> Vec<Arc<Airport>> {
    codes
        .iter()
        .filter_map(|code| master_data.airport_by_name(code))
        .collect()
}

/// 计划版本展开为日航段
fn build_legs(preplan: &Preplan, master_data: &MasterData) -> ReportResult<Vec<ConnectionLeg>> {
    let mut legs = Vec::new();
    for requirement in preplan.active_requirements() {
        let departure = master_data
            .airport(&requirement.departure_airport_id)
            .ok_or_else(|| ReportError::UnknownAirport(requirement.departure_airport_id.clone()))?;
        let arrival = master_data
            .airport(&requirement.arrival_airport_id)
            .ok_or_else(|| ReportError::UnknownAirport(requirement.arrival_airport_id.clone()))?;
        for day in &requirement.days {
            legs.push(ConnectionLeg {
                departure_airport: departure.clone(),
                arrival_airport: arrival.clone(),
                day: day.day,
                std_minutes: day.std.minutes()?,
                block_time: day.scope.block_time,
            });
        }
    }
    Ok(legs)
}

fn bucket_per_day(
    legs: &[ConnectionLeg],
    east: &[Arc<Airport>],
    west: &[Arc<Airport>],
) -> [DayBucket; 7] {
    let mut buckets: [DayBucket; 7] = Default::default();
    let in_east = |airport: &Airport| east.iter().any(|a| a.id == airport.id);
    let in_west = |airport: &Airport| west.iter().any(|a| a.id == airport.id);

    for (index, leg) in legs.iter().enumerate() {
        if in_east(&leg.departure_airport) {
            buckets[leg.arrival_day().index()].east_arrivals.push(index);
        }
        if in_east(&leg.arrival_airport) {
            buckets[leg.day.index()].east_departures.push(index);
        }
        if in_west(&leg.departure_airport) {
            buckets[leg.arrival_day().index()].west_arrivals.push(index);
        }
        if in_west(&leg.arrival_airport) {
            buckets[leg.day.index()].west_departures.push(index);
        }
    }
    buckets
}

/// 有任一可行衔接的周几个数
///
/// 可行: 进港回绕到达分钟与离港起飞分钟之差落在开区间
/// (min×60, max×60) 内, 且两段在同一中转机场换乘
fn count_connection_days(
    legs: &[ConnectionLeg],
    buckets: &[DayBucket; 7],
    select: impl Fn(&DayBucket) -> (&Vec<usize>, &Vec<usize>),
    from_airport: &Airport,
    to_airport: &Airport,
    options: &ConnectionsOptions,
) -> u32 {
    let min_minutes = options.min_connection_time_hours * 60;
    let max_minutes = options.max_connection_time_hours * 60;

    let mut result = 0;
    for bucket in buckets.iter() {
        let (inbound, outbound) = select(bucket);
        let connects = inbound
            .iter()
            .filter(|&&index| legs[index].departure_airport.id == from_airport.id)
            .any(|&inbound_index| {
                let sta = legs[inbound_index].wrapped_sta();
                outbound
                    .iter()
                    .filter(|&&index| legs[index].arrival_airport.id == to_airport.id)
                    .any(|&outbound_index| {
                        let std = legs[outbound_index].std_minutes;
                        std > sta + min_minutes
                            && std < sta + max_minutes
                            && legs[inbound_index].arrival_airport.id
                                == legs[outbound_index].departure_airport.id
                    })
            });
        if connects {
            result += 1;
        }
    }
    result
}

/// HHmm 显示, 小时对 24 取模; 零分钟出空串
fn format_hhmm(minutes: i32) -> String {
    if minutes == 0 {
        return String::new();
    }
    format!("{:02}{:02}", (minutes / 60) % 24, minutes % 60)
}

fn join_times(minutes: &[i32]) -> String {
    minutes
        .iter()
        .map(|&m| format_hhmm(m))
        .collect::<Vec<String>>()
        .join("\r\n")
}
