//! Reservation Store - 预订集合与一致性规则
//!
//! 本模块是系统的权威数据源，负责：
//! - 预订的创建、修改、状态流转与删除
//! - 桌台占用耦合：活跃预订 (pending/confirmed) 占用桌台，
//!   进入终态 (cancelled/completed) 时释放
//! - 变更事件广播 (via broadcast channel)
//!
//! # 一致性不变量
//!
//! 对任意桌台 T：`T.is_available == true` 当且仅当
//! 没有活跃预订引用 T。校验先于变更执行，失败的操作不留下任何痕迹。
//!
//! # 状态流转
//!
//! ```text
//! create -> pending ──> confirmed ──> completed (终态)
//!              │            │
//!              └────────────┴──> cancelled (终态)
//! ```

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use shared::{Reservation, ReservationCreate, ReservationStatus, ReservationUpdate};
use tokio::sync::broadcast;

use crate::store::TableRegistry;
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_email, validate_guest_name, validate_guest_phone, validate_guests,
    validate_optional_text,
};
use crate::utils::{AppError, AppResult, time};

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// 预订变更事件
///
/// 每次成功的变更后广播，集成测试与后续的同步推送消费。
#[derive(Debug, Clone)]
pub enum ReservationEvent {
    Created(Reservation),
    Updated(Reservation),
    StatusChanged(Reservation),
    Deleted {
        id: String,
        table_number: String,
    },
}

/// 预订存储
pub struct ReservationStore {
    reservations: RwLock<Vec<Reservation>>,
    tables: Arc<TableRegistry>,
    event_tx: broadcast::Sender<ReservationEvent>,
}

impl ReservationStore {
    /// 创建空的预订存储，绑定桌台注册表
    pub fn new(tables: Arc<TableRegistry>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            reservations: RwLock::new(Vec::new()),
            tables,
            event_tx,
        }
    }

    /// 订阅变更事件
    pub fn subscribe(&self) -> broadcast::Receiver<ReservationEvent> {
        self.event_tx.subscribe()
    }

    /// 创建预订
    ///
    /// 校验全部字段；目标桌台必须存在 (NotFound) 且可用 (Conflict)。
    /// 成功后：分配新 ID、状态 pending、记录创建时间、
    /// 从桌台复制定金、桌台标记为不可用。
    pub fn create(&self, user_id: &str, draft: ReservationCreate) -> AppResult<Reservation> {
        validate_guest_name(&draft.guest_name)?;
        validate_guest_phone(&draft.guest_phone)?;
        validate_email(&draft.guest_email, "guestEmail")?;
        time::parse_date(&draft.date)?;
        time::parse_time(&draft.time)?;
        validate_guests(draft.guests)?;
        validate_optional_text(&draft.special_requests, "specialRequests", MAX_NOTE_LEN)?;

        let mut reservations = self.reservations.write();

        let table = self
            .tables
            .get_by_number(&draft.table_number)
            .ok_or_else(|| {
                AppError::not_found(format!("Table {} not found", draft.table_number))
            })?;
        if !table.is_available {
            return Err(AppError::conflict(format!(
                "Table {} is not available",
                table.number
            )));
        }

        let reservation = Reservation {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            guest_name: draft.guest_name,
            guest_phone: draft.guest_phone,
            guest_email: draft.guest_email,
            date: draft.date,
            time: draft.time,
            guests: draft.guests,
            table_number: draft.table_number,
            status: ReservationStatus::Pending,
            special_requests: draft.special_requests,
            amount: table.deposit,
            created_at: Utc::now(),
        };

        self.tables.set_availability(&reservation.table_number, false)?;
        reservations.push(reservation.clone());

        tracing::info!(
            reservation_id = %reservation.id,
            table = %reservation.table_number,
            date = %reservation.date,
            time = %reservation.time,
            "Reservation created"
        );
        let _ = self
            .event_tx
            .send(ReservationEvent::Created(reservation.clone()));

        Ok(reservation)
    }

    /// 修改预订
    ///
    /// Patch 只承载客人可编辑字段；`id`/`user_id`/`status`/`created_at`/
    /// `amount` 在类型上不可表达，客户端传入即被丢弃。
    /// 换桌时对新桌台重新执行可用性检查，旧桌台按占用规则释放。
    pub fn update(&self, id: &str, patch: ReservationUpdate) -> AppResult<Reservation> {
        if let Some(name) = &patch.guest_name {
            validate_guest_name(name)?;
        }
        if let Some(phone) = &patch.guest_phone {
            validate_guest_phone(phone)?;
        }
        if let Some(email) = &patch.guest_email {
            validate_email(email, "guestEmail")?;
        }
        if let Some(date) = &patch.date {
            time::parse_date(date)?;
        }
        if let Some(t) = &patch.time {
            time::parse_time(t)?;
        }
        if let Some(guests) = patch.guests {
            validate_guests(guests)?;
        }
        validate_optional_text(&patch.special_requests, "specialRequests", MAX_NOTE_LEN)?;

        let mut reservations = self.reservations.write();
        let idx = reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

        let previous_table = reservations[idx].table_number.clone();
        let status = reservations[idx].status;

        // 换桌前先检查目标，失败时不留任何变更
        let target_table = match &patch.table_number {
            Some(number) if *number != previous_table => {
                let table = self.tables.get_by_number(number).ok_or_else(|| {
                    AppError::not_found(format!("Table {} not found", number))
                })?;
                if status.is_active() && !table.is_available {
                    return Err(AppError::conflict(format!(
                        "Table {} is not available",
                        table.number
                    )));
                }
                Some(table)
            }
            _ => None,
        };

        {
            let r = &mut reservations[idx];
            if let Some(v) = patch.guest_name {
                r.guest_name = v;
            }
            if let Some(v) = patch.guest_phone {
                r.guest_phone = v;
            }
            if let Some(v) = patch.guest_email {
                r.guest_email = v;
            }
            if let Some(v) = patch.date {
                r.date = v;
            }
            if let Some(v) = patch.time {
                r.time = v;
            }
            if let Some(v) = patch.guests {
                r.guests = v;
            }
            if let Some(v) = patch.special_requests {
                r.special_requests = Some(v);
            }
            if let Some(table) = &target_table {
                r.table_number = table.number.clone();
            }
        }

        // 占用耦合只对活跃预订生效：已终结的预订换桌不影响可用性
        if let Some(table) = &target_table
            && status.is_active()
        {
            self.tables.set_availability(&table.number, false)?;
            release_if_unclaimed(&reservations, &self.tables, &previous_table)?;
        }

        let updated = reservations[idx].clone();
        tracing::info!(reservation_id = %updated.id, "Reservation updated");
        let _ = self.event_tx.send(ReservationEvent::Updated(updated.clone()));

        Ok(updated)
    }

    /// 状态流转
    ///
    /// 仅允许 pending→confirmed、pending→cancelled、confirmed→cancelled、
    /// confirmed→completed；其余一律拒绝 (InvalidTransition)。
    /// 进入终态时按占用规则释放桌台；pending→confirmed 不改变可用性。
    pub fn set_status(
        &self,
        id: &str,
        new_status: ReservationStatus,
    ) -> AppResult<Reservation> {
        let mut reservations = self.reservations.write();
        let idx = reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

        let current = reservations[idx].status;
        if !current.can_transition_to(new_status) {
            return Err(AppError::invalid_transition(format!(
                "Cannot change status from {} to {}",
                current, new_status
            )));
        }

        reservations[idx].status = new_status;
        let table_number = reservations[idx].table_number.clone();

        if new_status.is_terminal() {
            release_if_unclaimed(&reservations, &self.tables, &table_number)?;
        }

        let updated = reservations[idx].clone();
        tracing::info!(
            reservation_id = %updated.id,
            from = %current,
            to = %new_status,
            "Reservation status changed"
        );
        let _ = self
            .event_tx
            .send(ReservationEvent::StatusChanged(updated.clone()));

        Ok(updated)
    }

    /// 永久删除预订 (管理端)
    ///
    /// 与取消不同：记录物理移除，桌台按占用规则释放。
    pub fn delete(&self, id: &str) -> AppResult<Reservation> {
        let mut reservations = self.reservations.write();
        let idx = reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

        let removed = reservations.remove(idx);
        release_if_unclaimed(&reservations, &self.tables, &removed.table_number)?;

        tracing::info!(reservation_id = %removed.id, "Reservation deleted");
        let _ = self.event_tx.send(ReservationEvent::Deleted {
            id: removed.id.clone(),
            table_number: removed.table_number.clone(),
        });

        Ok(removed)
    }

    /// 按 ID 查找预订
    pub fn get(&self, id: &str) -> Option<Reservation> {
        self.reservations
            .read()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// 所有预订快照 (插入顺序)
    pub fn list_all(&self) -> Vec<Reservation> {
        self.reservations.read().clone()
    }

    /// 指定用户的预订快照 (插入顺序)
    pub fn list_for_user(&self, user_id: &str) -> Vec<Reservation> {
        self.reservations
            .read()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }
}

/// 释放无活跃占用的桌台
///
/// 仅当没有其他活跃预订引用该桌台时才标记可用。
fn release_if_unclaimed(
    reservations: &[Reservation],
    tables: &TableRegistry,
    table_number: &str,
) -> AppResult<()> {
    let still_claimed = reservations
        .iter()
        .any(|r| r.status.is_active() && r.table_number == table_number);
    if !still_claimed {
        tables.set_availability(table_number, true)?;
    }
    Ok(())
}
