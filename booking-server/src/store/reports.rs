//! 按月报表聚合
//!
//! 只读派生：每次查询从全量预订历史重新计算，从不回写预订状态。
//! 月份归属按预订日期 (`date` 的 `YYYY-MM` 前缀)，与创建时间无关。

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::{HourCount, MonthlyStats, MonthlySummary, Reservation, ReservationStatus, TableCount};

use crate::utils::time::month_key;

/// Top-N 榜单长度
const TOP_N: usize = 5;

/// 全部月份的汇总列表，新月份在前
pub fn monthly_summaries(history: &[Reservation]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<&str, Vec<&Reservation>> = BTreeMap::new();
    for r in history {
        months.entry(month_key(&r.date)).or_default().push(r);
    }

    months
        .into_iter()
        .rev()
        .map(|(month, reservations)| summarize(month, &reservations))
        .collect()
}

/// 单月完整统计
///
/// 不存在任何预订的月份返回全零统计。
pub fn monthly_stats(month: &str, history: &[Reservation]) -> MonthlyStats {
    let in_month: Vec<&Reservation> = history
        .iter()
        .filter(|r| month_key(&r.date) == month)
        .collect();

    let summary = summarize(month, &in_month);

    MonthlyStats {
        month: summary.month,
        total_reservations: summary.total_reservations,
        completed_reservations: summary.completed_reservations,
        cancelled_reservations: summary.cancelled_reservations,
        revenue: summary.revenue,
        popular_tables: popular_tables(&in_month),
        peak_hours: peak_hours(&in_month),
    }
}

fn summarize(month: &str, reservations: &[&Reservation]) -> MonthlySummary {
    let completed = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Completed)
        .count() as u64;
    let cancelled = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Cancelled)
        .count() as u64;
    let revenue: Decimal = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Completed)
        .map(|r| r.amount)
        .sum();

    MonthlySummary {
        month: month.to_string(),
        total_reservations: reservations.len() as u64,
        completed_reservations: completed,
        cancelled_reservations: cancelled,
        revenue,
    }
}

/// Top-5 桌台：按预订次数降序，并列时桌号升序
fn popular_tables(reservations: &[&Reservation]) -> Vec<TableCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for r in reservations {
        *counts.entry(r.table_number.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<TableCount> = counts
        .into_iter()
        .map(|(table_number, count)| TableCount {
            table_number: table_number.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| compare_numbers(&a.table_number, &b.table_number))
    });
    ranked.truncate(TOP_N);
    ranked
}

/// Top-5 时段：按预订次数降序，并列时时间升序
fn peak_hours(reservations: &[&Reservation]) -> Vec<HourCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for r in reservations {
        *counts.entry(r.time.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<HourCount> = counts
        .into_iter()
        .map(|(hour, count)| HourCount {
            hour: hour.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.hour.cmp(&b.hour)));
    ranked.truncate(TOP_N);
    ranked
}

/// 桌号排序：都是数字时按数值比较 ("2" < "10")，否则按字典序
fn compare_numbers(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}
