//! REST surface over the domain services.
//!
//! Handlers stay thin: decode the request DTO, call one service method, and
//! map the result. Domain errors carry their own HTTP status; everything else
//! is a 500.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared::{
    AddStampRequest, AdjustPointsRequest, ContributeRequest, CreateAccountRequest, ErrorResponse,
    ExchangeRequest, PurchaseEtfRequest, SellEtfRequest, SetDonationGoalRequest,
    SetInterestCategoriesRequest, WatchEtfRequest,
};
use tracing::info;

use crate::domain::{
    AccountService, CashbackService, DomainError, DonationService, InvestService,
};
use crate::feeds;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub cashback: CashbackService,
    pub donations: DonationService,
    pub invest: InvestService,
    pub http: reqwest::Client,
}

/// Map a domain error to its HTTP response.
fn error_response(error: DomainError) -> Response {
    let status = match &error {
        DomainError::Validation(_)
        | DomainError::InvalidCategory(_)
        | DomainError::InsufficientFunds { .. }
        | DomainError::NoActiveGoal
        | DomainError::GoalNotReached { .. }
        | DomainError::ContributionExceedsGoal { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidRate => StatusCode::BAD_GATEWAY,
        DomainError::Store(e) => {
            tracing::error!("store failure: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/:name", get(get_account))
        .route("/stamps", post(add_stamp))
        .route("/stamps/:name/reset-slots", post(reset_slots))
        .route("/stamps/:name/reset", post(reset_stamps))
        .route("/cashback/:name", get(cashback_info))
        .route("/cashback/points", post(adjust_points))
        .route("/exchange", post(exchange))
        .route("/donation/:name", get(donation_info).delete(clear_goal))
        .route("/donation/goal", post(set_donation_goal))
        .route("/donation/contribute", post(contribute))
        .route("/donation/:name/complete", post(complete_goal))
        .route("/etf/purchase", post(purchase_etf))
        .route("/etf/sell", post(sell_etf))
        .route("/etf/watch", post(watch_etf))
        .route("/etf/categories", post(set_interest_categories))
        .route("/etf/:name/owned", get(owned_etfs))
        .route("/etf/:name/watched", get(watched_etfs))
        .route("/etf/:name/categories", get(interest_categories))
        .route("/etf/chart/:symbol", get(etf_chart));

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Axum handler for POST /api/accounts
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    info!("POST /api/accounts - name: {}", request.name);
    match state.accounts.create_account(request).await {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/accounts/:name
pub async fn get_account(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.accounts.get_account(&name).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/stamps
pub async fn add_stamp(
    State(state): State<AppState>,
    Json(request): Json<AddStampRequest>,
) -> impl IntoResponse {
    info!("POST /api/stamps - request: {:?}", request);
    match state.accounts.add_stamp(request).await {
        Ok(stamps) => (StatusCode::OK, Json(stamps)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/stamps/:name/reset-slots
pub async fn reset_slots(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.accounts.reset_slots(&name).await {
        Ok(stamps) => (StatusCode::OK, Json(stamps)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/stamps/:name/reset
pub async fn reset_stamps(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.accounts.reset_stamps(&name).await {
        Ok(stamps) => (StatusCode::OK, Json(stamps)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/cashback/:name
pub async fn cashback_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.cashback.cashback_info(&name).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/cashback/points
pub async fn adjust_points(
    State(state): State<AppState>,
    Json(request): Json<AdjustPointsRequest>,
) -> impl IntoResponse {
    info!("POST /api/cashback/points - request: {:?}", request);
    match state.cashback.adjust_points(request).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/exchange
pub async fn exchange(
    State(state): State<AppState>,
    Json(request): Json<ExchangeRequest>,
) -> impl IntoResponse {
    info!("POST /api/exchange - request: {:?}", request);
    match state.cashback.exchange(request).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/donation/:name
pub async fn donation_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.donations.donation_info(&name).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/donation/goal
pub async fn set_donation_goal(
    State(state): State<AppState>,
    Json(request): Json<SetDonationGoalRequest>,
) -> impl IntoResponse {
    info!("POST /api/donation/goal - request: {:?}", request);
    match state.donations.set_goal(request).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/donation/contribute
pub async fn contribute(
    State(state): State<AppState>,
    Json(request): Json<ContributeRequest>,
) -> impl IntoResponse {
    info!("POST /api/donation/contribute - request: {:?}", request);
    match state.donations.contribute(request).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/donation/:name/complete
pub async fn complete_goal(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/donation/{}/complete", name);
    match state.donations.complete(&name).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for DELETE /api/donation/:name
pub async fn clear_goal(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.donations.clear(&name).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/etf/purchase
pub async fn purchase_etf(
    State(state): State<AppState>,
    Json(request): Json<PurchaseEtfRequest>,
) -> impl IntoResponse {
    info!("POST /api/etf/purchase - request: {:?}", request);
    match state.invest.purchase(request).await {
        Ok(owned) => (StatusCode::OK, Json(owned)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/etf/sell
pub async fn sell_etf(
    State(state): State<AppState>,
    Json(request): Json<SellEtfRequest>,
) -> impl IntoResponse {
    info!("POST /api/etf/sell - request: {:?}", request);
    match state.invest.sell(request).await {
        Ok(owned) => (StatusCode::OK, Json(owned)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/etf/watch
pub async fn watch_etf(
    State(state): State<AppState>,
    Json(request): Json<WatchEtfRequest>,
) -> impl IntoResponse {
    match state.invest.toggle_watch(request).await {
        Ok(watched) => (StatusCode::OK, Json(watched)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for POST /api/etf/categories
pub async fn set_interest_categories(
    State(state): State<AppState>,
    Json(request): Json<SetInterestCategoriesRequest>,
) -> impl IntoResponse {
    match state.invest.set_categories(request).await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/etf/:name/owned
pub async fn owned_etfs(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.invest.owned(&name).await {
        Ok(owned) => (StatusCode::OK, Json(owned)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/etf/:name/watched
pub async fn watched_etfs(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.invest.watched(&name).await {
        Ok(watched) => (StatusCode::OK, Json(watched)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/etf/:name/categories
pub async fn interest_categories(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.invest.categories(&name).await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler for GET /api/etf/chart/:symbol
///
/// Proxies the upstream chart payload so browser clients are not blocked by
/// the provider's CORS policy.
pub async fn etf_chart(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> impl IntoResponse {
    match feeds::fetch_etf_chart(&state.http, &symbol).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(feeds::FeedError::NoData(symbol)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("no chart data for symbol {symbol}"),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("chart fetch failed: {:?}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "chart feed unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::AccountDb;
    use crate::domain::AccountLocks;
    use crate::feeds::FixedRateSource;
    use axum::body::to_bytes;
    use shared::{AccountResponse, CashbackInfoResponse, ExchangeDirection, ExchangeResponse};
    use std::sync::Arc;

    async fn setup_test_state() -> AppState {
        let db = AccountDb::init_test().await.expect("test db");
        let locks = AccountLocks::new();
        AppState {
            accounts: AccountService::new(db.clone(), locks.clone()),
            cashback: CashbackService::new(
                db.clone(),
                locks.clone(),
                Arc::new(FixedRateSource(1350.0)),
            ),
            donations: DonationService::new(db.clone(), locks.clone()),
            invest: InvestService::new(db, locks),
            http: reqwest::Client::new(),
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_account_handler_returns_created() {
        let state = setup_test_state().await;
        let response = create_account(
            State(state),
            Json(CreateAccountRequest {
                name: "jisoo".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let account: AccountResponse = body_json(response).await;
        assert_eq!(account.name, "jisoo");
        assert_eq!(account.point_balance, 0.0);
    }

    #[tokio::test]
    async fn get_unknown_account_is_404() {
        let state = setup_test_state().await;
        let response = get_account(State(state), Path("nobody".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: ErrorResponse = body_json(response).await;
        assert!(body.error.contains("nobody"));
    }

    #[tokio::test]
    async fn adjust_points_then_exchange() {
        let state = setup_test_state().await;
        create_account(
            State(state.clone()),
            Json(CreateAccountRequest {
                name: "jisoo".to_string(),
            }),
        )
        .await;

        let response = adjust_points(
            State(state.clone()),
            Json(AdjustPointsRequest {
                name: "jisoo".to_string(),
                delta: 1000.0,
                label: "cashback".to_string(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let info: CashbackInfoResponse = body_json(response).await;
        assert_eq!(info.points, 1000.0);

        let response = exchange(
            State(state),
            Json(ExchangeRequest {
                name: "jisoo".to_string(),
                amount: 1000.0,
                direction: ExchangeDirection::PointsToDollars,
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let receipt: ExchangeResponse = body_json(response).await;
        assert_eq!(receipt.point_balance, 0.0);
        assert_eq!(receipt.dollar_balance, 0.74);
    }

    #[tokio::test]
    async fn overdraft_maps_to_bad_request() {
        let state = setup_test_state().await;
        create_account(
            State(state.clone()),
            Json(CreateAccountRequest {
                name: "jisoo".to_string(),
            }),
        )
        .await;

        let response = adjust_points(
            State(state),
            Json(AdjustPointsRequest {
                name: "jisoo".to_string(),
                delta: -50.0,
                label: "spend".to_string(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn donation_flow_over_handlers() {
        let state = setup_test_state().await;
        create_account(
            State(state.clone()),
            Json(CreateAccountRequest {
                name: "jisoo".to_string(),
            }),
        )
        .await;
        adjust_points(
            State(state.clone()),
            Json(AdjustPointsRequest {
                name: "jisoo".to_string(),
                delta: 500.0,
                label: "cashback".to_string(),
            }),
        )
        .await;

        let response = set_donation_goal(
            State(state.clone()),
            Json(SetDonationGoalRequest {
                name: "jisoo".to_string(),
                category: "환경 동물 보호".to_string(),
                target_amount: 500.0,
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        // completing before the target is funded is a client error
        let response = complete_goal(State(state.clone()), Path("jisoo".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        contribute(
            State(state.clone()),
            Json(ContributeRequest {
                name: "jisoo".to_string(),
                amount: 500.0,
            }),
        )
        .await;
        let response = complete_goal(State(state), Path("jisoo".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let info: shared::DonationInfoResponse = body_json(response).await;
        assert_eq!(info.total_amount, 500.0);
        assert_eq!(info.history.len(), 1);
    }
}
