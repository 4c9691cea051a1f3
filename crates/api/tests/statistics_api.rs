//! Integration tests for `GET /api/statistics`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, insert_award, insert_fallen, insert_profile, NewFallen};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_database_yields_zeroed_statistics(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/statistics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["overview"]["totalHeroes"], 0);
    assert_eq!(json["overview"]["totalRegions"], 0);
    assert_eq!(json["overview"]["avgAge"], 0);
    assert_eq!(json["byRegion"].as_array().unwrap().len(), 0);
    assert_eq!(json["byMonth"].as_array().unwrap().len(), 0);
    assert_eq!(json["youngest"].as_array().unwrap().len(), 0);
    assert_eq!(json["mostDecorated"].as_array().unwrap().len(), 0);

    // Age brackets are always present.
    let ranges: Vec<&str> = json["byAge"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["range"].as_str().unwrap())
        .collect();
    assert_eq!(ranges, ["18-25", "26-35", "36-45", "46-55", "56+"]);
    assert!(json["byAge"]
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["count"] == 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn statistics_count_only_visible_records(pool: PgPool) {
    let owner = insert_profile(&pool, "owner").await;

    let petrov = insert_fallen(&pool, NewFallen::approved(owner, "Петров")).await;
    insert_fallen(
        &pool,
        NewFallen {
            hometown: Some("Тула"),
            service_type: Some("mobilized"),
            birth_date: Some("1970-01-01"),
            death_date: Some("2024-02-10"),
            ..NewFallen::approved(owner, "Сидоров")
        },
    )
    .await;
    insert_fallen(
        &pool,
        NewFallen {
            hometown: None,
            service_type: None,
            birth_date: None,
            ..NewFallen::approved(owner, "Безымянный")
        },
    )
    .await;
    let pending = insert_fallen(
        &pool,
        NewFallen {
            status: "pending",
            ..NewFallen::approved(owner, "Скрытый")
        },
    )
    .await;
    insert_fallen(
        &pool,
        NewFallen {
            is_deleted: true,
            ..NewFallen::approved(owner, "Удалённый")
        },
    )
    .await;

    insert_award(&pool, petrov, "Орден Мужества", "approved").await;
    insert_award(&pool, petrov, "Медаль За отвагу", "approved").await;
    insert_award(&pool, petrov, "Медаль Жукова", "pending").await;
    insert_award(&pool, pending, "Орден Мужества", "approved").await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/statistics").await).await;

    // Петров: 2023 - 1990 = 33, Сидоров: 2024 - 1970 = 54.
    assert_eq!(json["overview"]["totalHeroes"], 3);
    assert_eq!(json["overview"]["totalRegions"], 2);
    assert_eq!(json["overview"]["avgAge"], 44);

    assert_eq!(json["byRegion"][0]["name"], "Курск");
    assert_eq!(json["byRegion"][1]["name"], "Тула");
    assert_eq!(json["byRegion"][2]["name"], "Не указан");

    let services: Vec<&str> = json["byServiceType"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(services, ["Доброволец", "Мобилизованный", "Не указан"]);

    assert_eq!(json["byAge"][1]["count"], 1);
    assert_eq!(json["byAge"][3]["count"], 1);

    let months: Vec<&str> = json["byMonth"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["month"].as_str().unwrap())
        .collect();
    assert_eq!(months, ["2023-06", "2024-02"]);
    assert_eq!(json["byMonth"][0]["count"], 2);

    assert_eq!(json["youngest"][0]["name"], "Петров Иван");
    assert_eq!(json["youngest"][0]["age"], 33);
    assert_eq!(json["oldest"][0]["age"], 54);
    assert!(json["oldest"][0].get("photoUrl").is_some());

    let decorated = json["mostDecorated"].as_array().unwrap();
    assert_eq!(decorated.len(), 1);
    assert_eq!(decorated[0]["id"], petrov);
    assert_eq!(decorated[0]["awardsCount"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_read_returns_sanitized_500_without_partial_statistics(pool: PgPool) {
    let owner = insert_profile(&pool, "owner").await;
    insert_fallen(&pool, NewFallen::approved(owner, "Петров")).await;
    sqlx::query("DROP TABLE fallen_awards CASCADE")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/api/statistics").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert!(json.get("overview").is_none());
    assert!(!json["error"].as_str().unwrap().contains("fallen_awards"));
}
