// ==========================================
// 航班计划报表引擎 - 方案报表 (Proposal Report)
// ==========================================
// 职责: 协调五个引擎, 按标签产出排好序、分好组的方案报表
// 流水线: 展开 → RSX 过滤 → 压平 → 按起飞时刻排序 → 衔接
//         → 航线排序 → 父航线/许可说明 → 班次频率
// 红线: 对照计划只读; 计算全程同步无 IO
// ==========================================

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::domain::{Airport, FlightRequirement, MasterData, Preplan, Weekday};
use crate::engine::{
    ConnectionLinker, DailyExpander, DiffEngine, FlattenEngine, FlattenedFlight, ReportPass,
    RouteSorter,
};

use super::error::{ReportError, ReportResult};
use super::options::ProposalOptions;

// ==========================================
// 输出模型
// ==========================================

/// 类别分组: 报表正文的一个段落。
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: String,
    /// 正班行数, 备份行从该下标开始; 没有并入备份时为 None
    pub count_of_real_flight: Option<usize>,
    pub flights: Vec<FlattenedFlight>,
}

/// 方案报表: 平铺行集 (正班轮在前) 与类别分组视图。
#[derive(Debug, Clone)]
pub struct ProposalReport {
    pub flights: Vec<FlattenedFlight>,
    pub groups: Vec<CategoryGroup>,
}

// ==========================================
// ProposalReportEngine - 方案报表引擎
// ==========================================

pub struct ProposalReportEngine {
    expander: DailyExpander,
    flatten: FlattenEngine,
    linker: ConnectionLinker,
    sorter: RouteSorter,
    diff: DiffEngine,
}

impl ProposalReportEngine {
    pub fn new() -> Self {
        ProposalReportEngine {
            expander: DailyExpander::new(),
            flatten: FlattenEngine::new(),
            linker: ConnectionLinker::new(),
            sorter: RouteSorter::new(),
            diff: DiffEngine::new(),
        }
    }

    /// 生成方案报表 (无对照)
    ///
    /// # 参数
    /// - preplan: 当前计划版本
    /// - master_data: 机场与机型主数据
    /// - options: 报表选项
    ///
    /// # 返回
    /// 平铺行集与类别分组
    #[instrument(skip(self, preplan, master_data, options), fields(preplan = %preplan.name))]
    pub fn generate(
        &self,
        preplan: &Preplan,
        master_data: &MasterData,
        options: &ProposalOptions,
    ) -> ReportResult<ProposalReport> {
        options.validate()?;
        let base_airport = self.resolve_base_airport(master_data, options)?;
        let base_date = preplan.base_date();
        let requirements: Vec<&FlightRequirement> = preplan.active_requirements().collect();

        info!(
            requirement_count = requirements.len(),
            base_airport = %base_airport.name,
            "开始生成方案报表"
        );

        let mut real = self.generate_pass(
            &requirements,
            &base_airport,
            master_data,
            options,
            base_date,
            ReportPass::Real,
        )?;
        let mut reserve = self.generate_pass(
            &requirements,
            &base_airport,
            master_data,
            options,
            base_date,
            ReportPass::Reserve,
        )?;

        self.flatten.initialize_status(&mut real);
        self.flatten.initialize_status(&mut reserve);

        Ok(assemble(real, reserve))
    }

    /// 生成带对照的方案报表
    ///
    /// 两轮各自与对照计划的同轮结果对比, 对比后按标签稳定排序;
    /// 对照两轮沿用当前计划的基准日, 两版落在同一参照系上
    ///
    /// # 参数
    /// - preplan: 当前计划版本
    /// - target: 对照计划版本 (只读)
    /// - master_data: 机场与机型主数据
    /// - options: 报表选项
    #[instrument(
        skip(self, preplan, target, master_data, options),
        fields(preplan = %preplan.name, target = %target.name)
    )]
    pub fn generate_with_comparison(
        &self,
        preplan: &Preplan,
        target: &Preplan,
        master_data: &MasterData,
        options: &ProposalOptions,
    ) -> ReportResult<ProposalReport> {
        options.validate()?;
        let base_airport = self.resolve_base_airport(master_data, options)?;
        let base_date = preplan.base_date();
        let requirements: Vec<&FlightRequirement> = preplan.active_requirements().collect();
        let target_requirements: Vec<&FlightRequirement> = target.active_requirements().collect();

        info!(
            requirement_count = requirements.len(),
            target_requirement_count = target_requirements.len(),
            "开始生成对照方案报表"
        );

        let mut real = self.generate_pass(
            &requirements,
            &base_airport,
            master_data,
            options,
            base_date,
            ReportPass::Real,
        )?;
        let mut reserve = self.generate_pass(
            &requirements,
            &base_airport,
            master_data,
            options,
            base_date,
            ReportPass::Reserve,
        )?;
        self.flatten.initialize_status(&mut real);
        self.flatten.initialize_status(&mut reserve);

        let target_real = self.generate_pass(
            &target_requirements,
            &base_airport,
            master_data,
            options,
            base_date,
            ReportPass::Real,
        )?;
        let target_reserve = self.generate_pass(
            &target_requirements,
            &base_airport,
            master_data,
            options,
            base_date,
            ReportPass::Reserve,
        )?;

        self.diff.compare(&mut real, &target_real);
        real.sort_by(|a, b| a.label.cmp(&b.label));
        self.diff.compare(&mut reserve, &target_reserve);
        reserve.sort_by(|a, b| a.label.cmp(&b.label));

        Ok(assemble(real, reserve))
    }

    // ==========================================
    // 流水线
    // ==========================================

    /// 跑完一轮 (正班或备份) 的全部标签
    fn generate_pass(
        &self,
        requirements: &[&FlightRequirement],
        base_airport: &Airport,
        master_data: &MasterData,
        options: &ProposalOptions,
        base_date: DateTime<Utc>,
        pass: ReportPass,
    ) -> ReportResult<Vec<FlattenedFlight>> {
        let labels =
            self.expander
                .collect_labels(requirements, base_airport, options.flight_type, master_data)?;

        let mut result: Vec<FlattenedFlight> = Vec::new();
        for label in &labels {
            let occurrences = self.expander.expand(requirements, label, master_data)?;
            let occurrences = self.expander.filter_rsx(occurrences, pass, options);
            let mut flights =
                self.flatten
                    .flatten(&occurrences, &base_airport.id, base_date, label)?;
            flights.sort_by_key(|flight| flight.std_minutes());

            // 衔接图按排序后的下标记边, 此后顺序只经 order 置换表变动
            let graph = self.linker.link(&flights);
            let order = self.sorter.sort(&flights, &graph, &base_airport.id);
            let mut sorted: Vec<FlattenedFlight> =
                order.into_iter().map(|index| flights[index].clone()).collect();

            let parent_route = distinct_routes(&sorted).join(",");
            apply_permission_messages(&mut sorted, &parent_route);
            result.extend(sorted);
        }

        calculate_frequency(&mut result);
        debug!(pass = ?pass, flight_count = result.len(), "单轮报表生成完成");
        Ok(result)
    }

    fn resolve_base_airport(
        &self,
        master_data: &MasterData,
        options: &ProposalOptions,
    ) -> ReportResult<std::sync::Arc<Airport>> {
        master_data
            .airport(&options.base_airport_id)
            .ok_or_else(|| ReportError::UnknownAirport(options.base_airport_id.clone()))
    }
}

// ==========================================
// 报表层辅助
// ==========================================

/// 两轮结果拼装: 各自按类别分组, 备份组并入同类正班组
fn assemble(real: Vec<FlattenedFlight>, reserve: Vec<FlattenedFlight>) -> ProposalReport {
    let mut groups = group_by_category(&real);
    let mut reserve_groups = group_by_category(&reserve);

    for group in &mut groups {
        if let Some(position) = reserve_groups
            .iter()
            .position(|reserve_group| reserve_group.category == group.category)
        {
            let partner = reserve_groups.remove(position);
            group.count_of_real_flight = Some(group.flights.len());
            group.flights.extend(partner.flights);
        }
    }
    groups.append(&mut reserve_groups);

    let mut flights = real;
    flights.extend(reserve);
    ProposalReport { flights, groups }
}

/// 类别分组, 组按类别字符串升序 (空类别排最前), 组内保持输入顺序
fn group_by_category(flights: &[FlattenedFlight]) -> Vec<CategoryGroup> {
    let mut categories: Vec<String> = flights.iter().map(|f| f.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
        .into_iter()
        .map(|category| CategoryGroup {
            flights: flights
                .iter()
                .filter(|flight| flight.category == category)
                .cloned()
                .collect(),
            count_of_real_flight: None,
            category,
        })
        .collect()
}

/// 航线去重, 保持首次出现顺序
fn distinct_routes(flights: &[FlattenedFlight]) -> Vec<String> {
    let mut routes: Vec<String> = Vec::new();
    for flight in flights {
        if !routes.contains(&flight.route) {
            routes.push(flight.route.clone());
        }
    }
    routes
}

/// 填父航线、备注与两侧许可说明
fn apply_permission_messages(flights: &mut [FlattenedFlight], parent_route: &str) {
    for flight in flights.iter_mut() {
        flight.parent_route = parent_route.to_string();
        flight.note = flight.notes.join(",");
        flight.destination_no_permissions = permission_message(
            &flight.destination_no_permission_week_days,
            flight.days.len(),
        );
        flight.domestic_no_permissions =
            permission_message(&flight.domestic_no_permission_week_days, flight.days.len());
    }
}

fn permission_message(no_permission_days: &[Weekday], operating_count: usize) -> String {
    if no_permission_days.is_empty() {
        return "OK".to_string();
    }
    if no_permission_days.len() == operating_count {
        return "NOT OK".to_string();
    }
    let names: Vec<&str> = no_permission_days.iter().map(|day| day.short_name()).collect();
    format!("NOT OK for: {}", names.join(","))
}

/// 班次频率: 同父航线各计数求和后按半班显示, 只留非零分量, 写在组内首行
fn calculate_frequency(flights: &mut [FlattenedFlight]) {
    let mut parent_routes: Vec<String> = Vec::new();
    for flight in flights.iter() {
        if !parent_routes.contains(&flight.parent_route) {
            parent_routes.push(flight.parent_route.clone());
        }
    }

    for route in &parent_routes {
        let indices: Vec<usize> = flights
            .iter()
            .enumerate()
            .filter(|(_, flight)| &flight.parent_route == route)
            .map(|(index, _)| index)
            .collect();
        let real: u32 = indices.iter().map(|&i| flights[i].real_frequency).sum();
        let standby: u32 = indices.iter().map(|&i| flights[i].standby_frequency).sum();
        let extra: u32 = indices.iter().map(|&i| flights[i].extra_frequency).sum();

        let mut components: Vec<String> = Vec::new();
        if real != 0 {
            components.push(format_half(real));
        }
        if standby != 0 {
            components.push(format_half(standby));
        }
        if extra != 0 {
            components.push(format_half(extra));
        }
        if let Some(&first) = indices.first() {
            flights[first].frequency = components.join("+");
        }
    }
}

// 周频按每周往返对算半班: 偶数和出整数, 奇数和出 .5
fn format_half(sum: u32) -> String {
    if sum % 2 == 0 {
        (sum / 2).to_string()
    } else {
        format!("{}.5", sum / 2)
    }
}
