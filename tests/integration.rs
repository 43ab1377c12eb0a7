//! Integration tests for the Benefit Engine API.
//!
//! This test suite drives the router end to end:
//! - Policy lookup by date
//! - Proration ratio from the reduction period
//! - Childcare calculation in direct and detailed mode
//! - Floor and offset behaviour
//! - Housing score, unemployment benefit and youth savings
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use benefit_engine::api::{create_router, AppState};
use benefit_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/benefits").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, body.to_string()).await
}

async fn post_raw(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected a decimal string, got {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn direct_form(wage: &str, before: &str, after: &str) -> Value {
    json!({
        "start_date": "2026-01-01",
        "end_date": "2026-01-31",
        "hours_before": before,
        "hours_after": after,
        "wage_mode": "direct",
        "ordinary_wage": wage,
        "auto_policy": true,
        "auto_ratio": true
    })
}

fn warning_codes(result: &Value) -> Vec<String> {
    result["result"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Policy Lookup
// =============================================================================

#[tokio::test]
async fn test_policy_before_mid_2024() {
    let (status, body) =
        post_json(create_router_for_test(), "/childcare/policy", json!({ "date": "2024-06-30" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["policy"]["hours_threshold_tier_a"], "5");
    assert_decimal(&body["policy"]["cap_tier_a"], "2000000");
}

#[tokio::test]
async fn test_policy_from_mid_2024() {
    let (status, body) =
        post_json(create_router_for_test(), "/childcare/policy", json!({ "date": "2024-07-01" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["policy"]["hours_threshold_tier_a"], "10");
}

#[tokio::test]
async fn test_policy_2025_and_2026_caps() {
    let (_, body) =
        post_json(create_router_for_test(), "/childcare/policy", json!({ "date": "2025-06-01" })).await;
    assert_decimal(&body["policy"]["cap_tier_a"], "2200000");
    assert_decimal(&body["policy"]["cap_tier_b"], "1500000");

    let (_, body) =
        post_json(create_router_for_test(), "/childcare/policy", json!({ "date": "2026-02-01" })).await;
    assert_decimal(&body["policy"]["cap_tier_a"], "2500000");
    assert_decimal(&body["policy"]["cap_tier_b"], "1600000");
    assert_decimal(&body["policy"]["floor_monthly"], "500000");
}

#[tokio::test]
async fn test_policy_unparseable_date_is_not_found() {
    let (status, body) =
        post_json(create_router_for_test(), "/childcare/policy", json!({ "date": "next week" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "POLICY_NOT_AVAILABLE");
}

// =============================================================================
// SECTION 2: Proration Ratio
// =============================================================================

#[tokio::test]
async fn test_ratio_single_day_in_january() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/childcare/ratio",
        json!({ "start_date": "2026-01-15", "end_date": "2026-01-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["kind"], "single_month");
    assert_decimal(&body["result"]["ratio"], "0.0323");
    assert_eq!(body["display"]["ratio"], "0.0323");
}

#[tokio::test]
async fn test_ratio_spanning_months_warns() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/childcare/ratio",
        json!({ "start_date": "2026-01-20", "end_date": "2026-02-10" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["kind"], "spans_months");
    assert_eq!(body["result"]["warning"]["code"], "SPANS_MONTHS");
    assert!(body.get("display").is_none());
}

#[tokio::test]
async fn test_ratio_end_before_start_is_rejected() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/childcare/ratio",
        json!({ "start_date": "2026-01-15", "end_date": "2026-01-14" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 3: Childcare Calculation
// =============================================================================

#[tokio::test]
async fn test_childcare_direct_reference_case() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/childcare/calculate",
        direct_form("3,000,000", "40", "30"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_decimal(&result["benefit_tier_a"], "625000");
    assert_decimal(&result["benefit_tier_b"], "0");
    assert_decimal(&result["total_benefit"], "625000");
    assert_decimal(&result["company_paid_after"], "2250000");
    assert_decimal(&result["grand_total_income"], "2875000");
    assert_eq!(result["floor_applied"], false);

    assert_eq!(body["display"]["total_benefit"], "625,000원");
    assert_eq!(body["display"]["grand_total_income"], "2,875,000원");
    assert_eq!(body["display"]["hours_ratio"], "75%");
    assert_eq!(body["display"]["proration_ratio"], "1.0000");
    assert!(body["calculation_id"].as_str().is_some());
}

#[tokio::test]
async fn test_childcare_into_tier_b() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/childcare/calculate",
        direct_form("3000000", "40", "25"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["result"]["benefit_tier_a"], "625000");
    assert_decimal(&body["result"]["benefit_tier_b"], "200000");
    assert_decimal(&body["result"]["total_benefit"], "825000");

    let rule_ids: Vec<&str> = body["result"]["audit_trace"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec!["wage_base", "tier_a_benefit", "tier_b_benefit", "benefit_floor"]
    );
}

#[tokio::test]
async fn test_childcare_detailed_reference_case() {
    let body = json!({
        "start_date": "2026-01-01",
        "end_date": "2026-01-31",
        "hours_before": 40,
        "hours_after": 20,
        "wage_mode": "detailed",
        "items": [
            { "label": "Base pay", "amount": "2,000,000", "counts_as_ordinary_wage": true, "pay_mode": "proportional" },
            { "label": "Meal", "amount": 300000, "counts_as_ordinary_wage": false, "pay_mode": "full_pay" }
        ],
        "auto_policy": true
    });

    let (status, body) = post_json(create_router_for_test(), "/childcare/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["result"]["ordinary_wage_base"], "2000000");
    assert_decimal(&body["result"]["company_paid_after"], "1300000");
    assert_eq!(body["result"]["company_pay_basis"], "itemized_pay_modes");
}

#[tokio::test]
async fn test_childcare_half_month_proration() {
    let mut form = direct_form("3000000", "40", "30");
    form["end_date"] = json!("2026-01-15");

    let (status, body) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["proration_ratio"], "0.4839");
    // 625,000 × 0.4839
    assert_decimal(&body["result"]["total_benefit"], "302437.5");
    assert_eq!(body["display"]["total_benefit"], "302,438원");
}

#[tokio::test]
async fn test_childcare_spanning_months_keeps_ratio_and_warns() {
    let mut form = direct_form("3000000", "40", "30");
    form["end_date"] = json!("2026-03-10");

    let (status, body) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["proration_ratio"], "1");
    assert!(warning_codes(&body).contains(&"SPANS_MONTHS".to_string()));
}

#[tokio::test]
async fn test_childcare_floor_applies() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/childcare/calculate",
        direct_form("1000000", "40", "35"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["result"]["total_benefit"], "500000");
    assert_eq!(body["result"]["floor_applied"], true);
    assert!(warning_codes(&body).contains(&"FLOOR_APPLIED".to_string()));
}

#[tokio::test]
async fn test_childcare_offset_caps_total_income() {
    let mut form = direct_form("3000000", "40", "30");
    form["total_monthly_pay"] = json!("3,600,000");
    form["apply_offset"] = json!(true);

    let (status, body) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["result"]["company_paid_after"], "2700000");
    assert_decimal(&body["result"]["total_benefit"], "300000");
    assert_decimal(&body["result"]["offset_reduction"], "325000");
    assert_decimal(&body["result"]["grand_total_income"], "3000000");
    assert!(warning_codes(&body).contains(&"OFFSET_APPLIED".to_string()));
}

#[tokio::test]
async fn test_childcare_manual_policy_fields() {
    let form = json!({
        "hours_before": "40",
        "hours_after": "30",
        "ordinary_wage": "3000000",
        "policy": {
            "hours_threshold_tier_a": "10",
            "cap_tier_a": "2,000,000",
            "cap_tier_b": "1,500,000",
            "ratio_tier_b": "0.8",
            "floor_monthly": "500,000"
        }
    });

    let (status, body) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::OK);
    // 2,000,000 × 10/40
    assert_decimal(&body["result"]["total_benefit"], "500000");
    assert_decimal(&body["policy"]["cap_tier_a"], "2000000");
}

#[tokio::test]
async fn test_childcare_no_reduction() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/childcare/calculate",
        direct_form("3000000", "40", "40"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["result"]["total_benefit"], "0");
    assert_decimal(&body["result"]["grand_total_income"], "3000000");
    assert!(warning_codes(&body).contains(&"NO_REDUCTION".to_string()));
}

// =============================================================================
// SECTION 4: Other Calculators
// =============================================================================

#[tokio::test]
async fn test_housing_score_maximum() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/housing/score",
        json!({ "homeless_years": "15", "dependents": 6, "account_years": "15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["result"]["total_score"], "84");
}

#[tokio::test]
async fn test_unemployment_benefit() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/unemployment/calculate",
        json!({
            "age": 35,
            "is_disabled": false,
            "insured_years": 2,
            "insured_months": 0,
            "average_monthly_wage": "3200000"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["result"]["daily_benefit"], "64000");
    assert_eq!(body["result"]["benefit_days"], 150);
    assert_decimal(&body["result"]["total_benefit"], "9600000");
    assert_eq!(body["display"]["total_benefit"], "9,600,000원");
}

#[tokio::test]
async fn test_unemployment_lower_limit() {
    let (_, body) = post_json(
        create_router_for_test(),
        "/unemployment/calculate",
        json!({ "age": 35, "insured_years": 2, "average_monthly_wage": "3000000" }),
    )
    .await;

    assert_decimal(&body["result"]["daily_benefit"], "63104");
    assert_eq!(body["result"]["applied_limit"], "lower");
}

#[tokio::test]
async fn test_unemployment_missing_wage() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/unemployment/calculate",
        json!({ "age": 35, "insured_years": 2, "average_monthly_wage": "0" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_youth_leap_contribution() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/youth-leap/calculate",
        json!({ "annual_income": "2400", "monthly_deposit": "700000", "annual_rate_percent": "0" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["result"]["monthly_contribution"], "24000");
    assert_decimal(&body["result"]["total_contribution"], "1440000");
    assert_eq!(body["result"]["eligible"], true);
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let (status, error) = post_raw(
        create_router_for_test(),
        "/childcare/calculate",
        "{invalid json".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_missing_policy_date() {
    let (status, error) = post_json(create_router_for_test(), "/childcare/policy", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_error_validation_lists_every_problem() {
    let form = json!({
        "hours_before": "",
        "hours_after": "abc",
        "ordinary_wage": ""
    });

    let (status, error) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    let errors = error["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0], "hours before reduction must be greater than 0");
    assert_eq!(errors[2], "ordinary wage must be entered");
}

#[tokio::test]
async fn test_error_hours_after_exceed_before() {
    let (status, error) = post_json(
        create_router_for_test(),
        "/childcare/calculate",
        direct_form("3000000", "30", "40"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("must not exceed hours before reduction")
    );
}

#[tokio::test]
async fn test_error_end_before_start_without_auto_ratio() {
    let form = json!({
        "start_date": "2026-01-20",
        "end_date": "2026-01-10",
        "hours_before": "40",
        "hours_after": "30",
        "ordinary_wage": "3000000"
    });

    let (status, error) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("is before start date"));
}

#[tokio::test]
async fn test_error_detailed_mode_without_items() {
    let form = json!({
        "hours_before": "40",
        "hours_after": "30",
        "wage_mode": "detailed",
        "items": []
    });

    let (status, error) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_error_huge_item_amounts_are_rejected() {
    let form = json!({
        "hours_before": "40",
        "hours_after": "30",
        "wage_mode": "detailed",
        "apply_offset": true,
        "items": [
            {
                "label": "Base pay",
                "amount": "79,228,162,514,264,337,593,543,950,335",
                "counts_as_ordinary_wage": true,
                "pay_mode": "proportional"
            },
            {
                "label": "Allowance",
                "amount": "79,228,162,514,264,337,593,543,950,335",
                "counts_as_ordinary_wage": false,
                "pay_mode": "full_pay"
            }
        ]
    });

    let (status, error) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    let errors = error["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(
        errors[0]
            .as_str()
            .unwrap()
            .starts_with("income item 'Base pay'")
    );
}

#[tokio::test]
async fn test_childcare_auto_policy_keeps_entered_tier_b_ratio() {
    let form = json!({
        "start_date": "2026-01-01",
        "end_date": "2026-01-31",
        "hours_before": "40",
        "hours_after": "15",
        "ordinary_wage": "3000000",
        "auto_policy": true,
        "policy": { "ratio_tier_b": "0.5" }
    });

    let (status, body) = post_json(create_router_for_test(), "/childcare/calculate", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&body["policy"]["ratio_tier_b"], "0.5");
    // min(3,000,000 × 0.5, 1,600,000) × 15 / 40
    assert_decimal(&body["result"]["benefit_tier_b"], "562500");
}
