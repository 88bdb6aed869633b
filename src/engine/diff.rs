// ==========================================
// 航班计划报表引擎 - 差异引擎
// ==========================================
// 职责: 把当前方案与对照方案的航班行做逐号对比, 填写变更标记
// 输入: 当前行集合 (可变) + 对照行集合 (只读快照)
// 输出: 当前行的 status 全量填写, 对照独有的航班合成删除行追加
// ==========================================
// 红线: 对照集合不被改动; 候选消耗通过工作集显式传递
// ==========================================

mod core;


pub use core::DiffEngine;
