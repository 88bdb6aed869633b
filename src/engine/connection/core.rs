// ==========================================
// 衔接引擎 - 搜索核心
// ==========================================
// 职责: 同日优先、前向优先的滚动 7 日衔接搜索
// 红线: 每个 (航班, 周几) 至多产生一条衔接, 先到先得不回溯
// ==========================================

use tracing::{debug, instrument};

use crate::domain::Weekday;
use crate::engine::flatten::FlattenedFlight;

/// 衔接关系图, 与航班行集合同序, 按下标索引。
///
/// `next[i]` 为 i 的后继衔接, `previous[i]` 为前驱; 边去重保序。
#[derive(Debug, Clone)]
pub struct ConnectionGraph {
    next: Vec<Vec<usize>>,
    previous: Vec<Vec<usize>>,
}

impl ConnectionGraph {
    fn with_flights(count: usize) -> ConnectionGraph {
        ConnectionGraph {
            next: vec![Vec::new(); count],
            previous: vec![Vec::new(); count],
        }
    }

    pub fn next_of(&self, index: usize) -> &[usize] {
        &self.next[index]
    }

    pub fn previous_of(&self, index: usize) -> &[usize] {
        &self.previous[index]
    }

    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    fn record_next(&mut self, from: usize, to: usize) {
        push_unique(&mut self.next[from], to);
        push_unique(&mut self.previous[to], from);
    }

    fn record_previous(&mut self, from: usize, to: usize) {
        push_unique(&mut self.previous[from], to);
        push_unique(&mut self.next[to], from);
    }
}

/// 衔接搜索引擎。
///
/// 对每个航班的每个公布 UTC 周几, 在其到达机场出发的航班中找唯一
/// 衔接对象: 同日且出发晚于到达者优先, 否则按日距 1..6 先前向后
/// 后向探测; 命中即消耗候选的对应周几。
pub struct ConnectionLinker {}

impl ConnectionLinker {
    pub fn new() -> Self {
        ConnectionLinker {}
    }

    /// 建立一个标签组的衔接关系图。
    ///
    /// 前向日距不超过 3 记为后继衔接, 其余 (含一切后向命中) 记为前驱;
    /// 两端互记反向边。找不到候选的周几不产生边。
    #[instrument(skip(self, flights), fields(flight_count = flights.len()))]
    pub fn link(&self, flights: &[FlattenedFlight]) -> ConnectionGraph {
        let mut graph = ConnectionGraph::with_flights(flights.len());
        // 消耗用工作集, 公布周几保持不变
        let mut remaining: Vec<Vec<Weekday>> =
            flights.iter().map(|flight| flight.utc_days.clone()).collect();

        let mut edge_count = 0usize;
        for (index, current) in flights.iter().enumerate() {
            let midnight_crossed = current.std_minutes() > current.sta_minutes();
            for day in &current.utc_days {
                let arrival_day = if midnight_crossed { day.offset(1) } else { *day };
                let Some(hit) = self.find_connection(flights, &remaining, current, arrival_day)
                else {
                    continue;
                };
                remaining[hit.candidate].retain(|d| *d != hit.consumed_day);
                if hit.is_next {
                    graph.record_next(index, hit.candidate);
                } else {
                    graph.record_previous(index, hit.candidate);
                }
                edge_count += 1;
            }
        }
        debug!(edge_count, "衔接搜索完成");
        graph
    }

    fn find_connection(
        &self,
        flights: &[FlattenedFlight],
        remaining: &[Vec<Weekday>],
        current: &FlattenedFlight,
        arrival_day: Weekday,
    ) -> Option<ConnectionHit> {
        // 同日衔接要求出发晚于当前到达
        for (candidate, flight) in flights.iter().enumerate() {
            if flight.departure_airport.id == current.arrival_airport.id
                && flight.std_minutes() > current.sta_minutes()
                && remaining[candidate].contains(&arrival_day)
            {
                return Some(ConnectionHit {
                    candidate,
                    consumed_day: arrival_day,
                    is_next: true,
                });
            }
        }

        // 跨日探测不限出发时刻, 日距越近越优先, 同距前向优先
        for day_diff in 1..7 {
            let forward = arrival_day.offset(day_diff);
            for (candidate, flight) in flights.iter().enumerate() {
                if flight.departure_airport.id == current.arrival_airport.id
                    && remaining[candidate].contains(&forward)
                {
                    return Some(ConnectionHit {
                        candidate,
                        consumed_day: forward,
                        is_next: day_diff <= 3,
                    });
                }
            }
            let backward = arrival_day.offset(-day_diff);
            for (candidate, flight) in flights.iter().enumerate() {
                if flight.departure_airport.id == current.arrival_airport.id
                    && remaining[candidate].contains(&backward)
                {
                    return Some(ConnectionHit {
                        candidate,
                        consumed_day: backward,
                        is_next: false,
                    });
                }
            }
        }
        None
    }
}

struct ConnectionHit {
    candidate: usize,
    consumed_day: Weekday,
    is_next: bool,
}

fn push_unique(edges: &mut Vec<usize>, value: usize) {
    if !edges.contains(&value) {
        edges.push(value);
    }
}
