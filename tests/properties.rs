mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use property_favorites_api::{
    app,
    config::{AppConfig, PropertyDefaults},
    dto::properties::PropertyPayload,
    error::AppError,
    price::Price,
    state::AppState,
};
use serde_json::json;

#[tokio::test]
async fn seed_properties_keep_their_prices() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let properties = state.properties.list_properties().await?;
    assert_eq!(
        properties.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );

    let first = state.properties.get_property(1).await?;
    assert_eq!(first.price, Price::from_minor_units(350_000_000)?);
    Ok(())
}

#[tokio::test]
async fn create_with_partial_body() -> anyhow::Result<()> {
    let app = common::seeded_app().await?;

    let (status, body) = common::send(
        &app,
        common::json(
            "POST",
            "/api/properties",
            json!({ "title": "Test", "price": 100, "location": "X" }),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 6);
    assert_eq!(body["title"], "Test");
    assert_eq!(body["price"], 100.0);
    assert_eq!(body["location"], "X");
    assert!(body["imageUrl"].is_null());
    assert!(body["description"].is_null());
    Ok(())
}

#[tokio::test]
async fn non_string_text_fields_are_stored_as_text() -> anyhow::Result<()> {
    let app = common::seeded_app().await?;

    let (status, body) = common::send(
        &app,
        common::json(
            "POST",
            "/api/properties",
            json!({ "title": 5, "location": true, "price": "1.005" }),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "5");
    assert_eq!(body["location"], "true");
    assert_eq!(body["price"], 1.01);
    Ok(())
}

#[tokio::test]
async fn empty_body_takes_configured_defaults() -> anyhow::Result<()> {
    let config = AppConfig {
        property_defaults: PropertyDefaults {
            title: "Untitled".into(),
            location: "Bangkok".into(),
            ..PropertyDefaults::default()
        },
        ..AppConfig::in_memory()
    };
    let state = AppState::new(Arc::new(common::seeded_store().await?), &config);

    let property = state
        .properties
        .create_property(PropertyPayload::default())
        .await?;

    assert_eq!(property.title, "Untitled");
    assert_eq!(property.location, "Bangkok");
    assert_eq!(property.price, Price::ZERO);
    assert_eq!(property.image_url, None);
    Ok(())
}

#[tokio::test]
async fn update_changes_only_supplied_fields() -> anyhow::Result<()> {
    let app = common::seeded_app().await?;

    let (status, body) = common::send(
        &app,
        common::json("PUT", "/api/properties/3", json!({ "price": "4150000.50" })),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);
    assert_eq!(body["price"], 4150000.5);
    assert_eq!(body["title"], "ทาวน์เฮ้าส์สไตล์โมเดิร์น");
    assert_eq!(body["location"], "รังสิต, ปทุมธานี");
    assert_eq!(body["imageUrl"], "https://example.com/images/townhouse1.jpg");
    Ok(())
}

#[tokio::test]
async fn empty_update_returns_the_row_unchanged() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;
    let before = state.properties.get_property(2).await?;

    let after = state
        .properties
        .update_property(2, PropertyPayload::default())
        .await?;

    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn missing_property_is_not_found() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let get = state.properties.get_property(999).await.unwrap_err();
    let update = state
        .properties
        .update_property(999, PropertyPayload::default())
        .await
        .unwrap_err();
    let delete = state.properties.delete_property(999).await.unwrap_err();

    for err in [get, update, delete] {
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "property not found"));
    }
    Ok(())
}

#[tokio::test]
async fn deleting_a_property_cascades_to_favorites() -> anyhow::Result<()> {
    let app = common::seeded_app().await?;

    let (status, body) = common::send(&app, common::delete("/api/properties/1")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "property deleted" }));

    let (_, favorites) = common::send(&app, common::get("/api/favorites")).await?;
    let favorites = favorites.as_array().cloned().unwrap_or_default();
    assert_eq!(favorites.len(), 5);
    assert!(favorites.iter().all(|f| f["propertyId"] != 1));

    let (status, body) = common::send(&app, common::get("/api/properties/1")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "property not found");
    Ok(())
}

#[tokio::test]
async fn malformed_price_is_rejected() -> anyhow::Result<()> {
    let app = common::seeded_app().await?;

    for price in [json!("cheap"), json!(1e12), json!(true)] {
        let (status, body) = common::send(
            &app,
            common::json("POST", "/api/properties", json!({ "title": "T", "price": price })),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "price {price}");
        assert!(body["error"].is_string());
    }

    let (_, properties) = common::send(&app, common::get("/api/properties")).await?;
    assert_eq!(properties.as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn seeded_price_serializes_as_a_number() -> anyhow::Result<()> {
    let router = app(common::seeded_state().await?);

    let (status, body) = common::send(&router, common::get("/api/properties/1")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 3500000.0);
    assert!(body["description"].is_string());
    Ok(())
}
