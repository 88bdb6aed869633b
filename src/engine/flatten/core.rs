// ==========================================
// 展平引擎 - 合并核心
// ==========================================
// 职责: 逐日班次按合并键归并, 换算四组时刻显示与跨日标记
// 红线: 周几差值只允许 -1/0/+1, 越界按跨周回绕修正
// ==========================================

use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{Daytime, Rsx, TimeFormat, Weekday};
use crate::engine::expansion::DailyOccurrence;
use crate::report::error::ReportResult;

use super::model::{
    format_block_time, FlattenStatus, FlattenedFlight, WeekDayStatus, CIRCLE, EMPTY_CIRCLE,
    LEFT_HALF_CIRCLE, RIGHT_HALF_CIRCLE,
};

/// 展平引擎。
///
/// 将同一标签组内的日班次合并为周视图航班行: 相同合并键的班次
/// 落在同一行的不同周几格, 不同键各起一行。
pub struct FlattenEngine {}

impl FlattenEngine {
    pub fn new() -> Self {
        FlattenEngine {}
    }

    /// 合并一个标签组的日班次。
    ///
    /// 输出顺序为合并键的首次出现顺序, 行内周几为出现顺序。
    #[instrument(skip(self, occurrences), fields(label = %label, occurrence_count = occurrences.len()))]
    pub fn flatten(
        &self,
        occurrences: &[DailyOccurrence],
        base_airport_id: &str,
        base_date: DateTime<Utc>,
        label: &str,
    ) -> ReportResult<Vec<FlattenedFlight>> {
        let mut flights: Vec<FlattenedFlight> = Vec::new();
        for occurrence in occurrences {
            let std_minutes = occurrence.std.minutes()?;
            let normalized = normalize_flight_number(&occurrence.flight_number);
            let position = flights.iter().position(|flight| {
                flight.arrival_airport.id == occurrence.arrival_airport.id
                    && flight.departure_airport.id == occurrence.departure_airport.id
                    && flight.block_time == occurrence.block_time
                    && flight.flight_number == normalized
                    && flight.std_minutes() == std_minutes
            });
            match position {
                Some(index) => self.update(&mut flights[index], occurrence, base_airport_id),
                None => {
                    let mut flight = self.create(occurrence, base_date, label)?;
                    self.update(&mut flight, occurrence, base_airport_id);
                    flights.push(flight);
                }
            }
        }
        debug!(flight_count = flights.len(), "日班次合并完成");
        Ok(flights)
    }

    /// 对比前的状态复位: 依据许可清单填写每个周几的许可标记。
    pub fn initialize_status(&self, flights: &mut [FlattenedFlight]) {
        for flight in flights.iter_mut() {
            let mut status = FlattenStatus::default();
            for day in Weekday::ALL {
                let in_destination = flight.destination_no_permission_week_days.contains(&day);
                let in_domestic = flight.domestic_no_permission_week_days.contains(&day);
                status.week_days[day.index()] = WeekDayStatus {
                    has_permission: !in_destination && !in_domestic,
                    has_half_permission: in_destination != in_domestic,
                    is_change: false,
                    is_deleted: false,
                };
            }
            flight.status = status;
        }
    }

    fn create(
        &self,
        occurrence: &DailyOccurrence,
        base_date: DateTime<Utc>,
        label: &str,
    ) -> ReportResult<FlattenedFlight> {
        let utc_std = occurrence.std.to_instant(base_date)?;
        let local_std = occurrence.departure_airport.convert_utc_to_local(utc_std);
        let utc_sta = utc_std + Duration::minutes(i64::from(occurrence.block_time));
        let local_sta = occurrence.arrival_airport.convert_utc_to_local(utc_sta);

        let diff_local_std_utc_std = clamped_weekday_diff(local_std, utc_std);
        let diff_local_std_local_sta = clamped_weekday_diff(local_std, local_sta);
        let diff_local_std_utc_sta = clamped_weekday_diff(local_std, utc_sta);

        let local_std_display = clock_display(local_std);
        let mut local_sta_display = clock_display(local_sta);
        if diff_local_std_local_sta < 0 {
            local_sta_display.push('*');
        }
        let mut utc_std_display = clock_display(utc_std);
        if diff_local_std_utc_std < 0 {
            utc_std_display.push('*');
        }
        if diff_local_std_utc_std > 0 {
            utc_std_display.push('#');
        }
        let mut utc_sta_display = clock_display(utc_sta);
        if diff_local_std_utc_sta < 0 {
            utc_sta_display.push('*');
        }
        if diff_local_std_utc_sta > 0 {
            utc_sta_display.push('#');
        }

        Ok(FlattenedFlight {
            id: Uuid::new_v4().to_string(),
            label: label.to_string(),
            category: occurrence.category.clone(),
            flight_number: normalize_flight_number(&occurrence.flight_number),
            full_flight_number: occurrence.flight_number.clone(),
            departure_airport: occurrence.departure_airport.clone(),
            arrival_airport: occurrence.arrival_airport.clone(),
            block_time: occurrence.block_time,
            formatted_block_time: format_block_time(occurrence.block_time),
            days: Vec::new(),
            utc_days: Vec::new(),
            std: occurrence.std,
            sta: Daytime::from_clock(utc_sta),
            notes: Vec::new(),
            note: String::new(),
            local_std: local_std_display,
            local_sta: local_sta_display,
            utc_std: utc_std_display,
            utc_sta: utc_sta_display,
            diff_local_std_utc_std,
            diff_local_std_local_sta,
            diff_local_std_utc_sta,
            route: format!(
                "{}–{}",
                occurrence.departure_airport.name, occurrence.arrival_airport.name
            ),
            parent_route: String::new(),
            aircraft_type: occurrence.aircraft_type.clone(),
            real_frequency: 0,
            standby_frequency: 0,
            extra_frequency: 0,
            frequency: String::new(),
            day_chars: Default::default(),
            rsx_by_day: [None; 7],
            destination_no_permission_week_days: Vec::new(),
            domestic_no_permission_week_days: Vec::new(),
            destination_no_permissions: String::new(),
            domestic_no_permissions: String::new(),
            status: FlattenStatus::default(),
        })
    }

    fn update(&self, flight: &mut FlattenedFlight, occurrence: &DailyOccurrence, base_airport_id: &str) {
        let week_day = occurrence.day.offset(flight.diff_local_std_utc_std);
        let domestic_to_destination = occurrence.departure_airport.id == base_airport_id
            || !occurrence.departure_airport.international;

        if !flight.days.contains(&week_day) {
            flight.days.push(week_day);
            if !occurrence.departure_permission {
                if domestic_to_destination {
                    flight.domestic_no_permission_week_days.push(week_day);
                } else {
                    flight.destination_no_permission_week_days.push(week_day);
                }
            }
            if !occurrence.arrival_permission {
                // 跨日到达的许可落在到达当天
                let arrival_week_day = if flight.diff_local_std_local_sta < 0 {
                    week_day.offset(1)
                } else {
                    week_day
                };
                if domestic_to_destination {
                    flight
                        .destination_no_permission_week_days
                        .push(arrival_week_day);
                } else {
                    flight
                        .domestic_no_permission_week_days
                        .push(arrival_week_day);
                }
            }
        }
        if !flight.utc_days.contains(&occurrence.day) {
            flight.utc_days.push(occurrence.day);
        }
        if !flight.notes.contains(&occurrence.note) {
            flight.notes.push(occurrence.note.clone());
        }

        // 同一周几重复出现时后者覆盖格符号与班次性质
        flight.day_chars[week_day.index()] = day_character(occurrence, domestic_to_destination);
        flight.rsx_by_day[week_day.index()] = Some(occurrence.rsx);
        match occurrence.rsx {
            Rsx::Real => flight.real_frequency += 1,
            Rsx::Ext => flight.extra_frequency += 1,
            Rsx::Stb1 | Rsx::Stb2 => flight.standby_frequency += 1,
        }
    }
}

/// 航班号规范化: 去掉本航司 "W5 " 前缀, 再去掉单个前导零。
pub fn normalize_flight_number(flight_number: &str) -> String {
    if flight_number.to_uppercase().starts_with("W5 ") {
        if let Some(without_carrier) = flight_number.get(3..) {
            return without_carrier
                .strip_prefix('0')
                .unwrap_or(without_carrier)
                .to_string();
        }
    }
    flight_number.to_string()
}

fn day_character(occurrence: &DailyOccurrence, domestic_to_destination: bool) -> String {
    if occurrence.rsx != Rsx::Real {
        return occurrence.rsx.code().to_string();
    }
    let symbol = match (occurrence.departure_permission, occurrence.arrival_permission) {
        (true, true) => CIRCLE,
        (false, false) => EMPTY_CIRCLE,
        (false, true) => {
            if domestic_to_destination {
                LEFT_HALF_CIRCLE
            } else {
                RIGHT_HALF_CIRCLE
            }
        }
        (true, false) => {
            if domestic_to_destination {
                RIGHT_HALF_CIRCLE
            } else {
                LEFT_HALF_CIRCLE
            }
        }
    };
    symbol.to_string()
}

fn clock_display(instant: DateTime<Utc>) -> String {
    Daytime::from_clock(instant)
        .format(TimeFormat::Padded, false)
        .unwrap_or_default()
}

/// 两个时刻的周几差, 跨周回绕后只剩 -1/0/+1 三种取值。
fn clamped_weekday_diff(lhs: DateTime<Utc>, rhs: DateTime<Utc>) -> i32 {
    let mut diff = lhs.weekday().num_days_from_sunday() as i32
        - rhs.weekday().num_days_from_sunday() as i32;
    if diff > 1 {
        diff = -1;
    }
    if diff < -1 {
        diff = 1;
    }
    diff
}
