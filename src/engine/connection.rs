// ==========================================
// 航班计划报表引擎 - 衔接引擎
// ==========================================
// 职责: 在同一标签组内为每个 (航班, UTC 周几) 找唯一衔接航班
// 输入: 展平后的航班行集合 (顺序即下标)
// 输出: ConnectionGraph (下标表示的前后衔接边)
// ==========================================
// 红线: 候选周几一经消耗不再复用; 当前航班按公布周几遍历
// ==========================================

mod core;


pub use core::{ConnectionGraph, ConnectionLinker};
