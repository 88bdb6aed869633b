// ==========================================
// 航班计划报表引擎 - 航路排序引擎
// ==========================================
// 职责: 把一个标签组的航班行排成可读航路顺序
// 输入: 展平航班行 + 衔接关系图 + 基地机场
// 输出: 行下标的新排列
// ==========================================
// 注: 启发式排序, 衔接图允许成环, 以最早锚点为准
// ==========================================

mod core;


pub use core::RouteSorter;
