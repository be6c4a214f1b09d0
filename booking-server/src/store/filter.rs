//! 预订过滤层 (纯函数)
//!
//! 可见子集 = f(全量预订, 查看者, 搜索词, 状态, 日期)。
//! 四个谓词取与；不分页，结果保持输入顺序。

use serde::{Deserialize, Deserializer};
use shared::{Reservation, ReservationStatus};

use crate::auth::CurrentUser;

/// 查询参数 (`GET /api/reservations?search=&status=&date=`)
///
/// `status=all` 与缺省等价；`date=` 空串与缺省等价。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "status_filter")]
    pub status: Option<ReservationStatus>,
    #[serde(default)]
    pub date: Option<String>,
}

/// `"all"`/空串 → 无过滤；其余必须是合法状态
fn status_filter<'de, D>(deserializer: D) -> Result<Option<ReservationStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value
            .parse::<ReservationStatus>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// 查看者身份
///
/// 管理员看到全部；普通用户只看到自己的预订；匿名看不到任何预订。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Admin,
    User(String),
    Anonymous,
}

impl From<&CurrentUser> for Viewer {
    fn from(user: &CurrentUser) -> Self {
        if user.is_admin() {
            Viewer::Admin
        } else {
            Viewer::User(user.id.clone())
        }
    }
}

impl Viewer {
    /// 可见性谓词
    pub fn can_see(&self, reservation: &Reservation) -> bool {
        match self {
            Viewer::Admin => true,
            Viewer::User(id) => reservation.user_id == *id,
            Viewer::Anonymous => false,
        }
    }
}

/// 单条预订是否命中查询
pub fn matches(reservation: &Reservation, query: &ReservationQuery) -> bool {
    let matches_search = match query.search.as_deref() {
        None | Some("") => true,
        Some(needle) => {
            let needle_lower = needle.to_lowercase();
            reservation
                .guest_name
                .to_lowercase()
                .contains(&needle_lower)
                || reservation
                    .guest_email
                    .to_lowercase()
                    .contains(&needle_lower)
                || reservation.guest_phone.contains(needle)
        }
    };

    let matches_status = match query.status {
        None => true,
        Some(status) => reservation.status == status,
    };

    let matches_date = match query.date.as_deref() {
        None | Some("") => true,
        Some(date) => reservation.date == date,
    };

    matches_search && matches_status && matches_date
}

/// 过滤预订列表
pub fn apply(
    reservations: &[Reservation],
    viewer: &Viewer,
    query: &ReservationQuery,
) -> Vec<Reservation> {
    reservations
        .iter()
        .filter(|r| viewer.can_see(r) && matches(r, query))
        .cloned()
        .collect()
}
