//! End-to-end checkout and catalog flow tests
//!
//! signup → login → list products → checkout → deliver → rate, all through
//! the production router stack with a real embedded database.

mod common;

use common::{request_json, signup, spawn_app};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn full_checkout_flow_reaches_delivered_and_rated() {
    let (app, _state, _tmp) = spawn_app().await;

    // Seller lists two products; the second has no image
    let (seller_token, seller_id) =
        signup(&app, "Ravi", "ravi@farm.example", "seller-password", "seller").await;

    let (status, tomatoes) = request_json(
        &app,
        "POST",
        "/api/products",
        Some(&seller_token),
        Some(json!({
            "name": "Tomatoes",
            "description": "Vine ripened",
            "category": "vegetables",
            "price": 100.0,
            "imageUrl": "/api/uploads/abc.jpg",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{tomatoes}");
    assert_eq!(tomatoes["sellerId"], seller_id.as_str());

    let (status, honey) = request_json(
        &app,
        "POST",
        "/api/products",
        Some(&seller_token),
        Some(json!({
            "name": "Honey",
            "price": 50.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{honey}");
    // No image submitted → empty field, never an error
    assert_eq!(honey["imageUrl"], "");

    // Public listing shows both, no auth required
    let (status, listing) = request_json(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 2);

    // Buyer checks out a cart snapshot: 100×2 + 50×1 = 250
    let (buyer_token, buyer_id) =
        signup(&app, "Asha", "asha@example.com", "buyer-password", "buyer").await;

    let (status, order) = request_json(
        &app,
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "customerId": buyer_id,
            "customerName": "Asha",
            "customerEmail": "asha@example.com",
            "products": [
                {
                    "productId": tomatoes["id"],
                    "sellerId": seller_id,
                    "name": "Tomatoes",
                    "price": 100.0,
                    "quantity": 2,
                },
                {
                    "productId": honey["id"],
                    "sellerId": seller_id,
                    "name": "Honey",
                    "price": 50.0,
                },
            ],
            "totalAmount": 250.0,
            "shippingDetails": {
                "address": "12 Farm Lane",
                "city": "Pune",
                "state": "MH",
                "pincode": "411001",
            },
            "paymentMethod": "COD",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["totalAmount"], 250.0);
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["isDelivered"], false);
    // Quantity defaults to 1 when omitted
    assert_eq!(order["products"][1]["quantity"], 1);
    let order_id = order["id"].as_str().unwrap().to_string();

    // Buyer sees exactly their own order
    let (status, orders) = request_json(&app, "GET", "/api/orders", Some(&buyer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().unwrap().clone();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["customerId"], buyer_id.as_str());

    // Seller sees the order because its line items carry their sellerId
    let (status, seller_orders) =
        request_json(&app, "GET", "/api/orders/seller", Some(&seller_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seller_orders.as_array().unwrap().len(), 1);

    // A buyer is not a seller
    let (status, _) =
        request_json(&app, "GET", "/api/orders/seller", Some(&buyer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Mark delivered, then fetch and observe the flag
    let uri = format!("/api/orders/{}/deliver", order_id);
    let (status, body) = request_json(&app, "PATCH", &uri, Some(&seller_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order marked as delivered");

    let (_, orders) = request_json(&app, "GET", "/api/orders", Some(&buyer_token), None).await;
    assert_eq!(orders[0]["isDelivered"], true);
    assert!(orders[0]["deliveredAt"].as_str().is_some());

    // Delivering a missing order → 404
    let (status, _) = request_json(
        &app,
        "PATCH",
        "/api/orders/order:doesnotexist/deliver",
        Some(&seller_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Rating: out-of-range value → 400, then a valid one sticks
    let uri = format!("/api/orders/{}/rate", order_id);
    let (status, _) = request_json(
        &app,
        "PATCH",
        &uri,
        Some(&buyer_token),
        Some(json!({"value": 11.0, "comment": "??"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request_json(
        &app,
        "PATCH",
        &uri,
        Some(&buyer_token),
        Some(json!({"value": 5.0, "comment": "Great produce"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, orders) = request_json(&app, "GET", "/api/orders", Some(&buyer_token), None).await;
    assert_eq!(orders[0]["rating"]["value"], 5.0);
    assert_eq!(orders[0]["rating"]["comment"], "Great produce");
}

#[tokio::test]
async fn order_total_is_trusted_from_the_client() {
    // Known gap, not a guarantee: the server does not recompute the total
    // against sum(price × quantity). This test pins the discovered behavior
    // so any future server-side verification shows up as a deliberate change.
    let (app, _state, _tmp) = spawn_app().await;

    let (_token, buyer_id) =
        signup(&app, "Asha", "asha@example.com", "buyer-password", "buyer").await;

    let (status, order) = request_json(
        &app,
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "customerId": buyer_id,
            "products": [
                {"productId": "product:x", "sellerId": "user:y", "name": "Eggs", "price": 100.0, "quantity": 2},
            ],
            // Line items sum to 200, but the submitted total is 999
            "totalAmount": 999.0,
            "shippingDetails": {"address": "a", "city": "b", "state": "c", "pincode": "d"},
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["totalAmount"], 999.0);
}

#[tokio::test]
async fn product_delete_is_idempotent_and_owner_scoped() {
    let (app, _state, _tmp) = spawn_app().await;

    let (seller_token, _) =
        signup(&app, "Ravi", "ravi@farm.example", "seller-password", "seller").await;
    let (other_token, _) =
        signup(&app, "Meera", "meera@farm.example", "seller-password", "seller").await;

    let (_, product) = request_json(
        &app,
        "POST",
        "/api/products",
        Some(&seller_token),
        Some(json!({"name": "Carrots", "price": 30.0})),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();
    let uri = format!("/api/products/{}", product_id);

    // Another seller cannot delete it
    let (status, _) = request_json(&app, "DELETE", &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner can
    let (status, body) = request_json(&app, "DELETE", &uri, Some(&seller_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    // Second delete: still 200, reports not found rather than erroring
    let (status, body) = request_json(&app, "DELETE", &uri, Some(&seller_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], false);
}

#[tokio::test]
async fn public_listing_supports_seller_filter() {
    let (app, _state, _tmp) = spawn_app().await;

    let (ravi_token, ravi_id) =
        signup(&app, "Ravi", "ravi@farm.example", "seller-password", "seller").await;
    let (meera_token, _meera_id) =
        signup(&app, "Meera", "meera@farm.example", "seller-password", "seller").await;

    for (token, name) in [(&ravi_token, "Mangoes"), (&meera_token, "Paneer")] {
        let (status, _) = request_json(
            &app,
            "POST",
            "/api/products",
            Some(token),
            Some(json!({"name": name, "price": 80.0})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = request_json(&app, "GET", "/api/products", None, None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let uri = format!("/api/products?sellerId={}", ravi_id);
    let (_, filtered) = request_json(&app, "GET", &uri, None, None).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["name"], "Mangoes");

    // The authenticated seller view returns the caller's own products
    let (status, own) =
        request_json(&app, "GET", "/api/products/seller", Some(&meera_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let own = own.as_array().unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0]["name"], "Paneer");
}
