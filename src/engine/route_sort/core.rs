// ==========================================
// 航路排序引擎 - 放置核心
// ==========================================
// 职责: 基地出港航班优先放置, 后继衔接紧随其后
// 红线: 插入位置越界时贴到已放置序列末尾, 不报错
// ==========================================

use tracing::{debug, instrument};

use crate::engine::connection::ConnectionGraph;
use crate::engine::flatten::FlattenedFlight;

/// 航路排序引擎。
///
/// 反复取第一个未放置的基地出港航班: 若已放置序列中有把它记为前驱
/// 衔接的航班, 插到最早的那个锚点之前, 否则按未放置数量折算位置;
/// 随后把它的后继衔接依相对顺序插在它后面, 已放置的跳过。没有基地
/// 出港航班可取时, 剩余航班按原顺序追加收尾。
pub struct RouteSorter {}

impl RouteSorter {
    pub fn new() -> Self {
        RouteSorter {}
    }

    /// 产出行下标的新排列, 不改动航班行本身。
    #[instrument(skip(self, flights, graph), fields(flight_count = flights.len()))]
    pub fn sort(
        &self,
        flights: &[FlattenedFlight],
        graph: &ConnectionGraph,
        base_airport_id: &str,
    ) -> Vec<usize> {
        let mut unplaced: Vec<usize> = (0..flights.len()).collect();
        let mut placed: Vec<usize> = Vec::with_capacity(flights.len());

        while !unplaced.is_empty() {
            let Some(position) = unplaced
                .iter()
                .position(|&index| flights[index].departure_airport.id == base_airport_id)
            else {
                // 没有基地出港航班了, 剩余按原顺序收尾
                placed.append(&mut unplaced);
                break;
            };
            let current = unplaced.remove(position);

            // 锚点: 已放置且把当前航班记为前驱衔接的行, 取最早位置
            let mut min_index = unplaced.len() + 1;
            let anchor = placed
                .iter()
                .enumerate()
                .filter(|(_, &index)| graph.previous_of(index).contains(&current))
                .map(|(slot, _)| slot)
                .min();
            if let Some(slot) = anchor {
                min_index = slot;
            }
            let at = min_index.min(placed.len());
            placed.insert(at, current);

            for &successor in graph.next_of(current) {
                if placed.contains(&successor) {
                    continue;
                }
                min_index += 1;
                let at = min_index.min(placed.len());
                placed.insert(at, successor);
                unplaced.retain(|&index| index != successor);
            }
        }

        debug!(flight_count = placed.len(), "航路排序完成");
        placed
    }
}
