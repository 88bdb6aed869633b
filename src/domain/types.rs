// ==========================================
// 航班计划报表引擎 - 领域类型定义
// ==========================================
// 周序: 周六=0 ... 周五=6, 与周班需求及报表列顺序一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 周几 (Weekday)
// ==========================================
// 序列化格式: 整数 0-6 (与航班需求数据模型一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Weekday {
    Saturday = 0,  // 周六
    Sunday = 1,    // 周日
    Monday = 2,    // 周一
    Tuesday = 3,   // 周二
    Wednesday = 4, // 周三
    Thursday = 5,  // 周四
    Friday = 6,    // 周五
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Saturday,
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// 数组下标 (0-6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// 由 0-6 下标构造
    pub fn from_index(index: u8) -> Option<Weekday> {
        Weekday::ALL.get(index as usize).copied()
    }

    /// 向后偏移若干天 (模 7, 负数向前)
    pub fn offset(self, days: i32) -> Weekday {
        let index = (self as i32 + days).rem_euclid(7) as usize;
        Weekday::ALL[index]
    }

    /// 英文全名
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// 三字母缩写 (许可说明与中转报表列头使用)
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Weekday> for u8 {
    fn from(value: Weekday) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Weekday::from_index(value).ok_or_else(|| format!("周几下标越界: {}", value))
    }
}

// ==========================================
// RSX 状态 (日班次属性)
// ==========================================
// REAL=正班, STB1/STB2=两级备份, EXT=加班
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rsx {
    Real, // 正班
    Stb1, // 一级备份 (随正班出报)
    Stb2, // 二级备份 (随加班出报)
    Ext,  // 加班
}

impl Rsx {
    /// 报表单元格中的状态码文本
    pub fn code(self) -> &'static str {
        match self {
            Rsx::Real => "REAL",
            Rsx::Stb1 => "STB1",
            Rsx::Stb2 => "STB2",
            Rsx::Ext => "EXT",
        }
    }
}

impl fmt::Display for Rsx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ==========================================
// 航线类型 (Flight Type)
// ==========================================
// 按非基地一侧机场的国际属性划分标签范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightType {
    Domestic,      // 国内
    International, // 国际
}

impl fmt::Display for FlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightType::Domestic => write!(f, "DOMESTIC"),
            FlightType::International => write!(f, "INTERNATIONAL"),
        }
    }
}
