use super::*;
use crate::test_app;
use sqlx::{Pool, Sqlite};
use std::collections::HashSet;
use test_log::test;

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_create_and_list_organisations(pool: Pool<Sqlite>) {
    let (mut app, _state) = test_app(pool).await.expect("failed to create test app");

    let names = ["organisation_a", "organisation_b", "organisation_c"];
    let mut ids = Vec::new();
    for name in names {
        let response = app
            .as_service()
            .call(json_request(
                "POST",
                "/organisations/create",
                &json!({ "name": name }),
            ))
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], *name);
        ids.push(body["id"].as_i64().expect("id was not an integer"));
    }

    // every organisation got its own id
    let unique = ids.iter().collect::<HashSet<_>>();
    assert_eq!(unique.len(), names.len());

    let response = app
        .as_service()
        .call(get_request("/organisations/"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let listed = body
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|org| {
            org["name"]
                .as_str()
                .expect("name was not a string")
                .to_string()
        })
        .collect::<HashSet<_>>();
    let expected = names.iter().map(|n| n.to_string()).collect::<HashSet<_>>();
    assert_eq!(listed, expected);
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_show_organisation(pool: Pool<Sqlite>) {
    let (mut app, _state) = test_app(pool).await.expect("failed to create test app");

    let response = app
        .as_service()
        .call(json_request(
            "POST",
            "/organisations/create",
            &json!({ "name": "organisation_a" }),
        ))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["id"]
        .as_i64()
        .expect("id was not an integer");

    let response = app
        .as_service()
        .call(get_request(&format!("/organisations/{id}")))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "organisation_a");

    // reads don't change anything, so asking again gives the same answer
    let response = app
        .as_service()
        .call(get_request(&format!("/organisations/{id}")))
        .await
        .expect("Failed to execute request");
    assert_eq!(body_json(response).await, body);
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_show_missing_organisation(pool: Pool<Sqlite>) {
    let (mut app, _state) = test_app(pool).await.expect("failed to create test app");

    let response = app
        .as_service()
        .call(get_request("/organisations/12345"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Organisation 12345 not found");
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_create_organisation_rejects_bad_body(pool: Pool<Sqlite>) {
    let (mut app, _state) = test_app(pool).await.expect("failed to create test app");

    // missing required field
    let response = app
        .as_service()
        .call(json_request(
            "POST",
            "/organisations/create",
            &json!({ "title": "organisation_a" }),
        ))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // wrong type for the name field
    let response = app
        .as_service()
        .call(json_request(
            "POST",
            "/organisations/create",
            &json!({ "name": 57 }),
        ))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_duplicate_organisation_names(pool: Pool<Sqlite>) {
    let (mut app, _state) = test_app(pool).await.expect("failed to create test app");

    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = app
            .as_service()
            .call(json_request(
                "POST",
                "/organisations/create",
                &json!({ "name": "twins" }),
            ))
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        ids.push(body_json(response).await["id"].as_i64());
    }
    assert_ne!(ids[0], ids[1]);
}
