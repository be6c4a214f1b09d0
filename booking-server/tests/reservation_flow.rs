// booking-server/tests/reservation_flow.rs
// 端到端集成测试：通过 in-process 客户端驱动真实 Router

use booking_server::{Config, ServerState, build_router};
use chico_client::{
    ChicoClient, Client, ClientError, InProcessClient, RegisterRequest, ReservationCreate,
    ReservationListParams, ReservationStatus, ReservationUpdate, UserRole,
};

const ADMIN_EMAIL: &str = "admin@restaurant.com";
const ADMIN_PASSWORD: &str = "admin123";

fn test_state() -> ServerState {
    let config = Config::with_overrides(0, ADMIN_PASSWORD);
    ServerState::initialize(&config)
}

fn test_client(state: &ServerState) -> InProcessClient {
    ChicoClient::in_process(build_router(state.clone()))
}

async fn admin_client(state: &ServerState) -> InProcessClient {
    let mut client = test_client(state);
    client
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("admin login failed");
    client
}

async fn user_client(state: &ServerState, email: &str) -> InProcessClient {
    let mut client = test_client(state);
    client
        .register(&RegisterRequest {
            email: email.to_string(),
            password: "secret123".to_string(),
            name: "Test User".to_string(),
            phone: "+380 67 987 6543".to_string(),
        })
        .await
        .expect("register failed");
    client
}

fn draft(table: &str) -> ReservationCreate {
    ReservationCreate {
        guest_name: "Olena Kovalenko".to_string(),
        guest_phone: "+380 50 123 4567".to_string(),
        guest_email: "olena@example.com".to_string(),
        date: "2025-10-04".to_string(),
        time: "19:00".to_string(),
        guests: 3,
        table_number: table.to_string(),
        special_requests: Some("Window seat".to_string()),
    }
}

#[tokio::test]
async fn test_full_reservation_lifecycle_with_table_coupling() {
    let state = test_state();
    let admin = admin_client(&state).await;
    let user = user_client(&state, "olena@example.com").await;

    // 创建：桌台 5 (可用, 容量 4)，3 位客人
    let created = user.create_reservation(&draft("5")).await.unwrap();
    assert_eq!(created.status, ReservationStatus::Pending);
    assert_eq!(created.table_number, "5");
    assert_eq!(created.guest_name, "Olena Kovalenko");
    assert!(!created.id.is_empty());

    // 桌台 5 变为不可用
    let available: Vec<String> = user
        .available_tables()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.number)
        .collect();
    assert!(!available.contains(&"5".to_string()));

    // 管理员确认：桌台保持不可用
    let confirmed = admin
        .set_reservation_status(&created.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    assert!(
        !user
            .tables()
            .await
            .unwrap()
            .iter()
            .find(|t| t.number == "5")
            .unwrap()
            .is_available
    );

    // 取消：桌台重新可用
    let cancelled = admin
        .set_reservation_status(&created.id, ReservationStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert!(
        user.tables()
            .await
            .unwrap()
            .iter()
            .find(|t| t.number == "5")
            .unwrap()
            .is_available
    );
}

#[tokio::test]
async fn test_create_get_round_trip_preserves_guest_fields() {
    let state = test_state();
    let user = user_client(&state, "olena@example.com").await;

    let payload = draft("3");
    let created = user.create_reservation(&payload).await.unwrap();
    let fetched = user.reservation(&created.id).await.unwrap();

    assert_eq!(fetched.guest_name, payload.guest_name);
    assert_eq!(fetched.guest_phone, payload.guest_phone);
    assert_eq!(fetched.guest_email, payload.guest_email);
    assert_eq!(fetched.date, payload.date);
    assert_eq!(fetched.time, payload.time);
    assert_eq!(fetched.guests, payload.guests);
    assert_eq!(fetched.special_requests, payload.special_requests);
    assert_eq!(fetched.status, ReservationStatus::Pending);
}

#[tokio::test]
async fn test_double_booking_conflicts() {
    let state = test_state();
    let user = user_client(&state, "olena@example.com").await;
    let other = user_client(&state, "taras@example.com").await;

    user.create_reservation(&draft("5")).await.unwrap();

    let err = other.create_reservation(&draft("5")).await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));

    // 冲突不会留下第二条预订
    let mine = other
        .reservations(&ReservationListParams::default())
        .await
        .unwrap();
    assert!(mine.is_empty());
}

#[tokio::test]
async fn test_terminal_transition_rejected_end_to_end() {
    let state = test_state();
    let admin = admin_client(&state).await;
    let user = user_client(&state, "olena@example.com").await;

    let created = user.create_reservation(&draft("4")).await.unwrap();
    admin
        .set_reservation_status(&created.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    admin
        .set_reservation_status(&created.id, ReservationStatus::Completed)
        .await
        .unwrap();

    let err = admin
        .set_reservation_status(&created.id, ReservationStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Rule(_)));
}

#[tokio::test]
async fn test_status_change_permissions() {
    let state = test_state();
    let user = user_client(&state, "olena@example.com").await;

    let created = user.create_reservation(&draft("6")).await.unwrap();

    // 普通用户不能确认自己的预订
    let err = user
        .set_reservation_status(&created.id, ReservationStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // 但可以取消
    let cancelled = user
        .set_reservation_status(&created.id, ReservationStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn test_visibility_between_users() {
    let state = test_state();
    let admin = admin_client(&state).await;
    let user_a = user_client(&state, "olena@example.com").await;
    let user_b = user_client(&state, "taras@example.com").await;

    let a1 = user_a.create_reservation(&draft("1")).await.unwrap();
    let b1 = user_b.create_reservation(&draft("2")).await.unwrap();

    // A 只看到自己的预订，即使 B 的在全量存储里
    let visible_to_a = user_a
        .reservations(&ReservationListParams::default())
        .await
        .unwrap();
    assert_eq!(visible_to_a.len(), 1);
    assert_eq!(visible_to_a[0].id, a1.id);

    // A 不能按用户 ID 翻 B 的预订
    let err = user_a.user_reservations(&b1.user_id).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // A 不能直接读 B 的单条预订
    let err = user_a.reservation(&b1.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // 管理员看到全部
    let visible_to_admin = admin
        .reservations(&ReservationListParams::default())
        .await
        .unwrap();
    assert_eq!(visible_to_admin.len(), 2);
}

#[tokio::test]
async fn test_filtering_by_status_and_search() {
    let state = test_state();
    let admin = admin_client(&state).await;
    let user = user_client(&state, "olena@example.com").await;

    let r1 = user.create_reservation(&draft("1")).await.unwrap();
    let mut other = draft("2");
    other.guest_name = "Taras Shevchenko".to_string();
    other.guest_email = "taras@example.com".to_string();
    user.create_reservation(&other).await.unwrap();

    admin
        .set_reservation_status(&r1.id, ReservationStatus::Confirmed)
        .await
        .unwrap();

    let confirmed = admin
        .reservations(&ReservationListParams {
            status: Some(ReservationStatus::Confirmed),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, r1.id);

    let by_search = admin
        .reservations(&ReservationListParams {
            search: Some("taras".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].guest_name, "Taras Shevchenko");
}

#[tokio::test]
async fn test_update_moves_reservation_to_free_table() {
    let state = test_state();
    let user = user_client(&state, "olena@example.com").await;

    let created = user.create_reservation(&draft("7")).await.unwrap();
    let updated = user
        .update_reservation(
            &created.id,
            &ReservationUpdate {
                table_number: Some("8".to_string()),
                guests: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.table_number, "8");
    assert_eq!(updated.guests, 4);

    let tables = user.tables().await.unwrap();
    assert!(tables.iter().find(|t| t.number == "7").unwrap().is_available);
    assert!(!tables.iter().find(|t| t.number == "8").unwrap().is_available);
}

#[tokio::test]
async fn test_admin_delete_frees_table() {
    let state = test_state();
    let admin = admin_client(&state).await;
    let user = user_client(&state, "olena@example.com").await;

    let created = user.create_reservation(&draft("9")).await.unwrap();

    // 普通用户不能删除
    let err = user.delete_reservation(&created.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    // 管理员删除后桌台释放，记录消失
    assert!(admin.delete_reservation(&created.id).await.unwrap());
    let err = admin.reservation(&created.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(
        user.tables()
            .await
            .unwrap()
            .iter()
            .find(|t| t.number == "9")
            .unwrap()
            .is_available
    );
}

#[tokio::test]
async fn test_monthly_report_aggregation() {
    let state = test_state();
    let admin = admin_client(&state).await;
    let user = user_client(&state, "olena@example.com").await;

    // 3 笔预订：1 completed, 1 cancelled, 1 pending
    let r1 = user.create_reservation(&draft("1")).await.unwrap();
    let r2 = user.create_reservation(&draft("2")).await.unwrap();
    user.create_reservation(&draft("3")).await.unwrap();

    admin
        .set_reservation_status(&r1.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    admin
        .set_reservation_status(&r1.id, ReservationStatus::Completed)
        .await
        .unwrap();
    admin
        .set_reservation_status(&r2.id, ReservationStatus::Cancelled)
        .await
        .unwrap();

    let stats = admin.monthly_report("2025-10").await.unwrap();
    assert_eq!(stats.total_reservations, 3);
    assert_eq!(stats.completed_reservations, 1);
    assert_eq!(stats.cancelled_reservations, 1);
    assert_eq!(stats.revenue, r1.amount);
    assert!(!stats.popular_tables.is_empty());

    let summaries = admin.monthly_reports().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].month, "2025-10");

    // 普通用户无权看报表
    let err = user.monthly_report("2025-10").await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn test_unauthenticated_requests_are_rejected() {
    let state = test_state();
    let anonymous = test_client(&state);

    let err = anonymous
        .reservations(&ReservationListParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let err = anonymous.tables().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_auth_session_round_trip() {
    let state = test_state();
    let mut client = test_client(&state);

    let login = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(login.user.role, UserRole::Admin);
    assert!(client.token().is_some());

    let me = client.me().await.unwrap();
    assert_eq!(me.email, ADMIN_EMAIL);

    client.logout().await.unwrap();
    assert!(client.token().is_none());

    // 令牌丢弃后请求回到未认证状态
    let err = client.me().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_bad_credentials_are_rejected_uniformly() {
    let state = test_state();
    let mut client = test_client(&state);

    let wrong_password = client
        .login(ADMIN_EMAIL, "wrong-password")
        .await
        .unwrap_err();
    let unknown_email = client
        .login("ghost@example.com", ADMIN_PASSWORD)
        .await
        .unwrap_err();

    // 统一错误，不泄露邮箱是否注册
    match (&wrong_password, &unknown_email) {
        (ClientError::Validation(a), ClientError::Validation(b)) => assert_eq!(a, b),
        other => panic!("expected uniform validation errors, got {:?}", other),
    }
}

#[tokio::test]
async fn test_validation_errors_map_to_client_validation() {
    let state = test_state();
    let user = user_client(&state, "olena@example.com").await;

    let mut bad = draft("5");
    bad.guests = 0;
    let err = user.create_reservation(&bad).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let mut bad_date = draft("5");
    bad_date.date = "not-a-date".to_string();
    let err = user.create_reservation(&bad_date).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    // 校验失败不占用桌台
    let available: Vec<String> = user
        .available_tables()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.number)
        .collect();
    assert!(available.contains(&"5".to_string()));
}
