// ==========================================
// 差异引擎 - 对比核心
// ==========================================
// 职责: 按完整航班号分组, 同航线先行、跨航线随后的多轮对比
// 红线: 每轮检查对组内全部当前行跑完一遍后才进下一轮;
//       候选周几与配对一经消耗不再复用
// ==========================================

use tracing::{debug, instrument};

use crate::domain::Weekday;
use crate::engine::flatten::{FlattenStatus, FlattenedFlight, TimeStatus};

/// 候选工作集条目, 对应一个对照行。
///
/// `remaining_days` 从对照行的本地周几复制而来, 对比过程中逐步消耗;
/// `removed` 表示整个候选已被配对或清空, 退出后续检查。
struct Candidate {
    target_index: usize,
    remaining_days: Vec<Weekday>,
    removed: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RouteFilter {
    Same,
    Cross,
}

impl RouteFilter {
    fn matches(self, source_route: &str, target_route: &str) -> bool {
        match self {
            RouteFilter::Same => source_route == target_route,
            RouteFilter::Cross => source_route != target_route,
        }
    }
}

/// 差异引擎。
///
/// 当前行与对照行按完整航班号配组, 每组先做同航线三轮检查
/// (按时刻配对的周几对比、时刻对比、周几对比与反向标记),
/// 再做跨航线三轮并标记航线变更; 最后全局检测新增与删除的航班号。
pub struct DiffEngine {}

impl DiffEngine {
    pub fn new() -> Self {
        DiffEngine {}
    }

    /// 对比当前行与对照行, 结果写入当前行的 status。
    ///
    /// 对照集合只读; 对照独有的航班号合成删除行追加到当前集合尾部。
    #[instrument(skip(self, sources, targets), fields(source_count = sources.len(), target_count = targets.len()))]
    pub fn compare(&self, sources: &mut Vec<FlattenedFlight>, targets: &[FlattenedFlight]) {
        let mut numbers: Vec<String> = Vec::new();
        for flight in sources.iter() {
            if !numbers.contains(&flight.full_flight_number) {
                numbers.push(flight.full_flight_number.clone());
            }
        }

        for number in &numbers {
            let source_indices: Vec<usize> = sources
                .iter()
                .enumerate()
                .filter(|(_, flight)| &flight.full_flight_number == number)
                .map(|(index, _)| index)
                .collect();
            let mut candidates: Vec<Candidate> = targets
                .iter()
                .enumerate()
                .filter(|(_, flight)| &flight.full_flight_number == number)
                .map(|(index, flight)| Candidate {
                    target_index: index,
                    remaining_days: flight.days.clone(),
                    removed: false,
                })
                .collect();

            for filter in [RouteFilter::Same, RouteFilter::Cross] {
                for &index in &source_indices {
                    if filter == RouteFilter::Cross {
                        self.check_route_change(&mut sources[index], targets, &candidates);
                    }
                    self.check_day_change_by_times(
                        &mut sources[index],
                        targets,
                        &mut candidates,
                        filter,
                    );
                }
                for &index in &source_indices {
                    self.check_time_change(&mut sources[index], targets, &candidates, filter);
                    self.check_day_change(&mut sources[index], targets, &mut candidates, filter);
                }
                for &index in &source_indices {
                    self.check_day_change_by_target(
                        &mut sources[index],
                        targets,
                        &mut candidates,
                        filter,
                    );
                }
            }
        }

        self.check_new_flights(sources, targets);
        self.check_deleted_flights(sources, targets);
        debug!(result_count = sources.len(), "方案对比完成");
    }

    /// 时刻完全一致的对照行视作同一物理航班, 逐周几对比并配对消耗。
    fn check_day_change_by_times(
        &self,
        source: &mut FlattenedFlight,
        targets: &[FlattenedFlight],
        candidates: &mut [Candidate],
        filter: RouteFilter,
    ) {
        let route = source.route.clone();
        let Some(position) = candidates.iter().position(|candidate| {
            let target = &targets[candidate.target_index];
            !candidate.removed
                && filter.matches(&route, &target.route)
                && target.utc_sta == source.utc_sta
                && target.utc_std == source.utc_std
        }) else {
            return;
        };

        let target = &targets[candidates[position].target_index];
        for day in source.days.clone() {
            let absent = !candidates[position].remaining_days.contains(&day);
            let rsx_differs =
                source.rsx_by_day[day.index()] != target.rsx_by_day[day.index()];
            source.status.week_days[day.index()].is_change = absent || rsx_differs;
            candidates[position].remaining_days.retain(|d| *d != day);
        }
        // 残留的对照周几说明这天挪走了, 反向标记
        for day in &candidates[position].remaining_days {
            source.status.week_days[day.index()].is_change = true;
        }
        candidates[position].removed = true;
    }

    /// 四组时刻各自在未消耗候选里找相同显示值, 找不到即标变更。
    fn check_time_change(
        &self,
        source: &mut FlattenedFlight,
        targets: &[FlattenedFlight],
        candidates: &[Candidate],
        filter: RouteFilter,
    ) {
        let route = source.route.clone();
        let remaining: Vec<&FlattenedFlight> = candidates
            .iter()
            .filter(|candidate| {
                !candidate.removed
                    && filter.matches(&route, &targets[candidate.target_index].route)
            })
            .map(|candidate| &targets[candidate.target_index])
            .collect();
        if remaining.is_empty() {
            return;
        }

        source.status.local_sta = TimeStatus {
            is_change: !remaining.iter().any(|t| t.local_sta == source.local_sta),
        };
        source.status.local_std = TimeStatus {
            is_change: !remaining.iter().any(|t| t.local_std == source.local_std),
        };
        source.status.utc_sta = TimeStatus {
            is_change: !remaining.iter().any(|t| t.utc_sta == source.utc_sta),
        };
        source.status.utc_std = TimeStatus {
            is_change: !remaining.iter().any(|t| t.utc_std == source.utc_std),
        };
    }

    /// 逐周几在候选剩余周几里找同性质的同一天, 命中即消耗。
    fn check_day_change(
        &self,
        source: &mut FlattenedFlight,
        targets: &[FlattenedFlight],
        candidates: &mut [Candidate],
        filter: RouteFilter,
    ) {
        let route = source.route.clone();
        let in_scope = |candidate: &Candidate, targets: &[FlattenedFlight]| {
            !candidate.removed && filter.matches(&route, &targets[candidate.target_index].route)
        };

        for day in source.days.clone() {
            let any_days_left = candidates
                .iter()
                .any(|c| in_scope(c, targets) && !c.remaining_days.is_empty());
            if !any_days_left {
                // 候选全空时保留此前的标记
                continue;
            }
            let found = candidates.iter().position(|c| {
                in_scope(c, targets)
                    && c.remaining_days.contains(&day)
                    && source.rsx_by_day[day.index()]
                        == targets[c.target_index].rsx_by_day[day.index()]
            });
            source.status.week_days[day.index()].is_change = found.is_none();
            if let Some(position) = found {
                candidates[position].remaining_days.retain(|d| *d != day);
            }
        }

        // 清空的候选退出工作集
        for candidate in candidates.iter_mut() {
            if !candidate.removed
                && filter.matches(&route, &targets[candidate.target_index].route)
                && candidate.remaining_days.is_empty()
            {
                candidate.removed = true;
            }
        }
    }

    /// 对照行还挂着的周几一律反向标记为变更, 同时消耗。
    fn check_day_change_by_target(
        &self,
        source: &mut FlattenedFlight,
        targets: &[FlattenedFlight],
        candidates: &mut [Candidate],
        filter: RouteFilter,
    ) {
        let route = source.route.clone();
        for candidate in candidates.iter_mut() {
            if candidate.removed
                || !filter.matches(&route, &targets[candidate.target_index].route)
            {
                continue;
            }
            for day in candidate.remaining_days.drain(..) {
                source.status.week_days[day.index()].is_change = true;
            }
        }
    }

    /// 存在跨航线候选即标记航线变更, 不存在则保持原样。
    fn check_route_change(
        &self,
        source: &mut FlattenedFlight,
        targets: &[FlattenedFlight],
        candidates: &[Candidate],
    ) {
        let route = source.route.clone();
        let any_cross = candidates.iter().any(|candidate| {
            !candidate.removed && targets[candidate.target_index].route != route
        });
        if any_cross {
            source.status.route_change = true;
        }
    }

    /// 只在当前集合出现的航班号整体标记为新增。
    fn check_new_flights(&self, sources: &mut [FlattenedFlight], targets: &[FlattenedFlight]) {
        for source in sources.iter_mut() {
            let known = targets
                .iter()
                .any(|t| t.full_flight_number == source.full_flight_number);
            if !known {
                source.status.is_new = true;
            }
        }
    }

    /// 只在对照集合出现的航班号合成删除行追加到当前集合。
    ///
    /// 合成行保留时刻与航线显示, 清空周几符号, 历史运营的周几
    /// 标记为变更; 对照行本身不被改动。
    fn check_deleted_flights(
        &self,
        sources: &mut Vec<FlattenedFlight>,
        targets: &[FlattenedFlight],
    ) {
        if targets.is_empty() {
            return;
        }
        let source_numbers: Vec<&str> = sources
            .iter()
            .map(|flight| flight.full_flight_number.as_str())
            .collect();
        let deleted: Vec<&FlattenedFlight> = targets
            .iter()
            .filter(|t| !source_numbers.contains(&t.full_flight_number.as_str()))
            .collect();

        let mut synthesized = Vec::with_capacity(deleted.len());
        for target in deleted {
            let mut flight = target.clone();
            flight.status = FlattenStatus::default();
            flight.status.is_deleted = true;
            flight.day_chars = Default::default();
            for day in &flight.days {
                flight.status.week_days[day.index()].is_change = true;
            }
            synthesized.push(flight);
        }
        sources.append(&mut synthesized);
    }
}
