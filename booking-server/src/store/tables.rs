//! Table Availability Service
//!
//! 持有桌台集合，可用性标志是派生状态：
//! 当且仅当没有活跃预订 (pending/confirmed) 指向该桌台时为 true。
//! 该不变量由 [`ReservationStore`](crate::store::ReservationStore) 在
//! 每次生命周期变更时维护。

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::{Table, TableLocation};

use crate::utils::{AppError, AppResult};

/// 桌台注册表
pub struct TableRegistry {
    tables: RwLock<Vec<Table>>,
}

impl TableRegistry {
    /// 使用给定桌台创建注册表
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// 默认平面图：大厅 6 桌、露台 3 桌、包厢 3 桌
    ///
    /// 定金按区域定价，预订创建时复制到 `Reservation.amount`。
    pub fn with_default_floor_plan() -> Self {
        let layout: [(&str, u32, TableLocation); 12] = [
            ("1", 2, TableLocation::Main),
            ("2", 2, TableLocation::Main),
            ("3", 4, TableLocation::Main),
            ("4", 4, TableLocation::Main),
            ("5", 4, TableLocation::Main),
            ("6", 6, TableLocation::Main),
            ("7", 2, TableLocation::Terrace),
            ("8", 4, TableLocation::Terrace),
            ("9", 6, TableLocation::Terrace),
            ("10", 4, TableLocation::Private),
            ("11", 8, TableLocation::Private),
            ("12", 10, TableLocation::Private),
        ];

        let tables = layout
            .into_iter()
            .map(|(number, capacity, location)| Table {
                id: format!("t{}", number),
                number: number.to_string(),
                capacity,
                is_available: true,
                location,
                deposit: deposit_for(location),
            })
            .collect();

        Self::new(tables)
    }

    /// 获取所有桌台快照
    pub fn get_all(&self) -> Vec<Table> {
        self.tables.read().clone()
    }

    /// 获取当前可用桌台快照
    pub fn get_available(&self) -> Vec<Table> {
        self.tables
            .read()
            .iter()
            .filter(|t| t.is_available)
            .cloned()
            .collect()
    }

    /// 按编号查找桌台
    pub fn get_by_number(&self, number: &str) -> Option<Table> {
        self.tables
            .read()
            .iter()
            .find(|t| t.number == number)
            .cloned()
    }

    /// 设置桌台可用性 (幂等)
    ///
    /// 由 [`ReservationStore`](crate::store::ReservationStore) 在状态流转
    /// 时调用，管理端 PATCH 接口也会直接调用。
    pub fn set_availability(&self, number: &str, is_available: bool) -> AppResult<Table> {
        let mut tables = self.tables.write();
        let table = tables
            .iter_mut()
            .find(|t| t.number == number)
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", number)))?;
        table.is_available = is_available;
        Ok(table.clone())
    }
}

/// 区域定金 (UAH)
fn deposit_for(location: TableLocation) -> Decimal {
    match location {
        TableLocation::Main => Decimal::new(1500, 0),
        TableLocation::Terrace => Decimal::new(1800, 0),
        TableLocation::Private => Decimal::new(3500, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_floor_plan_starts_fully_available() {
        let registry = TableRegistry::with_default_floor_plan();
        assert_eq!(registry.get_all().len(), 12);
        assert_eq!(registry.get_available().len(), 12);
    }

    #[test]
    fn set_availability_is_idempotent() {
        let registry = TableRegistry::with_default_floor_plan();

        registry.set_availability("5", false).unwrap();
        registry.set_availability("5", false).unwrap();
        assert!(!registry.get_by_number("5").unwrap().is_available);

        registry.set_availability("5", true).unwrap();
        registry.set_availability("5", true).unwrap();
        assert!(registry.get_by_number("5").unwrap().is_available);
    }

    #[test]
    fn unknown_table_is_not_found() {
        let registry = TableRegistry::with_default_floor_plan();
        assert!(registry.get_by_number("99").is_none());
        assert!(registry.set_availability("99", true).is_err());
    }

    #[test]
    fn snapshots_are_copies() {
        let registry = TableRegistry::with_default_floor_plan();
        let mut snapshot = registry.get_all();
        snapshot[0].is_available = false;
        // External mutation of the snapshot does not leak into the registry
        assert!(registry.get_all()[0].is_available);
    }
}
