//! Invoice, payment reconciliation, expense, and reference-number tests.
//! Ignored by default; they need MongoDB (see auth_test.rs).

mod common;

use common::TestApp;
use serde_json::{json, Value};

fn two_line_items(product_id: &str) -> Value {
    json!([
        {
            "product_id": product_id,
            "product_name": "Solar Panel 540W",
            "quantity": 2.0,
            "price": 50.0,
            "tax_rate": 18.0,
            "amount": 100.0,
        },
        {
            "product_id": product_id,
            "product_name": "Solar Panel 540W",
            "quantity": 1.0,
            "price": 50.0,
            "tax_rate": 12.0,
            "amount": 50.0,
        },
    ])
}

#[tokio::test]
#[ignore = "requires running MongoDB"]
async fn invoice_totals_numbering_and_settlement() {
    let app = TestApp::spawn().await;
    let (token, _business_id) = app.signup_with_business("owner@example.com", 18.0).await;
    let customer_id = app.create_customer(&token, "Acme Rooftops").await;
    let product_id = app.create_product(&token, "Solar Panel 540W", 100.0).await;

    let response = app
        .post(
            "/invoices",
            Some(&token),
            &json!({
                "customer_id": customer_id,
                "items": two_line_items(&product_id),
                "discount": 0.0,
            }),
        )
        .await;
    assert_eq!(response.status(), 201);
    let invoice: Value = response.json().await.unwrap();

    assert_eq!(invoice["invoice_number"], "INV-00001");
    assert_eq!(invoice["customer_name"], "Acme Rooftops");
    assert_eq!(invoice["subtotal"], 150.0);
    assert_eq!(invoice["tax_amount"], 24.0);
    assert_eq!(invoice["total"], 174.0);
    assert_eq!(invoice["balance"], 174.0);
    assert_eq!(invoice["paid_amount"], 0.0);
    assert_eq!(invoice["status"], "unpaid");

    // Stock dropped by the summed quantities (2 + 1).
    let product: Value = app
        .get(&format!("/products/{}", product_id), Some(&token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(product["stock_quantity"], 97.0);

    // Settle in full.
    let invoice_id = invoice["id"].as_str().unwrap();
    let payment = app
        .post(
            "/payments",
            Some(&token),
            &json!({ "invoice_id": invoice_id, "amount": 174.0 }),
        )
        .await;
    assert_eq!(payment.status(), 201);
    let payment_body: Value = payment.json().await.unwrap();
    assert_eq!(payment_body["payment_number"], "PAY-00001");

    let settled: Value = app
        .get(&format!("/invoices/{}", invoice_id), Some(&token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(settled["paid_amount"], 174.0);
    assert_eq!(settled["balance"], 0.0);
    assert_eq!(settled["status"], "paid");
}

#[tokio::test]
#[ignore = "requires running MongoDB"]
async fn partial_payments_walk_the_status_forward() {
    let app = TestApp::spawn().await;
    let (token, _) = app.signup_with_business("owner@example.com", 18.0).await;
    let customer_id = app.create_customer(&token, "Acme Rooftops").await;
    let product_id = app.create_product(&token, "Inverter 5kW", 10.0).await;

    let invoice: Value = app
        .post(
            "/invoices",
            Some(&token),
            &json!({
                "customer_id": customer_id,
                "items": two_line_items(&product_id),
            }),
        )
        .await
        .json()
        .await
        .unwrap();
    let invoice_id = invoice["id"].as_str().unwrap();

    app.post(
        "/payments",
        Some(&token),
        &json!({ "invoice_id": invoice_id, "amount": 74.0 }),
    )
    .await;

    let partial: Value = app
        .get(&format!("/invoices/{}", invoice_id), Some(&token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(partial["paid_amount"], 74.0);
    assert_eq!(partial["balance"], 100.0);
    assert_eq!(partial["status"], "partial");

    // Over-pay the remainder: balance goes negative, status reads paid.
    app.post(
        "/payments",
        Some(&token),
        &json!({ "invoice_id": invoice_id, "amount": 150.0 }),
    )
    .await;

    let overpaid: Value = app
        .get(&format!("/invoices/{}", invoice_id), Some(&token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(overpaid["paid_amount"], 224.0);
    assert_eq!(overpaid["balance"], -50.0);
    assert_eq!(overpaid["status"], "paid");
}

#[tokio::test]
#[ignore = "requires running MongoDB"]
async fn sequence_numbers_are_contiguous_per_family() {
    let app = TestApp::spawn().await;
    let (token, _) = app.signup_with_business("owner@example.com", 18.0).await;
    let customer_id = app.create_customer(&token, "Acme Rooftops").await;
    let product_id = app.create_product(&token, "Cable Drum", 500.0).await;

    for expected in ["INV-00001", "INV-00002", "INV-00003"] {
        let invoice: Value = app
            .post(
                "/invoices",
                Some(&token),
                &json!({
                    "customer_id": customer_id,
                    "items": two_line_items(&product_id),
                }),
            )
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(invoice["invoice_number"], expected);
    }

    // Families count independently.
    let expense: Value = app
        .post("/expenses", Some(&token), &json!({ "amount": 100.0 }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(expense["expense_number"], "EXP-00001");
}

#[tokio::test]
#[ignore = "requires running MongoDB"]
async fn payment_against_unknown_invoice_still_records() {
    let app = TestApp::spawn().await;
    let (token, _) = app.signup_with_business("owner@example.com", 18.0).await;

    let response = app
        .post(
            "/payments",
            Some(&token),
            &json!({ "invoice_id": "no-such-invoice", "amount": 500.0 }),
        )
        .await;
    assert_eq!(response.status(), 201);

    let payments: Value = app.get("/payments", Some(&token)).await.json().await.unwrap();
    assert_eq!(payments.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires running MongoDB"]
async fn expense_snapshots_names_and_sums_total() {
    let app = TestApp::spawn().await;
    let (token, _) = app.signup_with_business("owner@example.com", 18.0).await;

    let category: Value = app
        .post("/expense-categories", Some(&token), &json!({ "name": "Transport" }))
        .await
        .json()
        .await
        .unwrap();
    let category_id = category["id"].as_str().unwrap();

    let expense: Value = app
        .post(
            "/expenses",
            Some(&token),
            &json!({
                "category_id": category_id,
                "amount": 500.0,
                "tax_amount": 90.0,
                "payment_method": "bank",
            }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(expense["total"], 590.0);
    assert_eq!(expense["category_name"], "Transport");

    // An id that doesn't resolve is recorded without a name, not an error.
    let orphan: Value = app
        .post(
            "/expenses",
            Some(&token),
            &json!({ "category_id": "no-such-category", "amount": 50.0 }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert!(orphan["category_name"].is_null());

    let report: Value = app
        .get("/reports/expenses", Some(&token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(report["summary"]["expense_count"], 2);
    assert_eq!(report["summary"]["total_amount"], 640.0);
    assert_eq!(report["summary"]["category_breakdown"]["Transport"], 590.0);
    assert_eq!(report["summary"]["category_breakdown"]["Uncategorized"], 50.0);
}

#[tokio::test]
#[ignore = "requires running MongoDB"]
async fn dashboard_stats_aggregate_the_books() {
    let app = TestApp::spawn().await;
    let (token, _) = app.signup_with_business("owner@example.com", 18.0).await;
    let customer_id = app.create_customer(&token, "Acme Rooftops").await;
    // Stock 1 with alert 10 puts this product in the low-stock list.
    let product_id = app.create_product(&token, "Mounting Rail", 1.0).await;

    app.post(
        "/invoices",
        Some(&token),
        &json!({
            "customer_id": customer_id,
            "items": two_line_items(&product_id),
        }),
    )
    .await;
    app.post("/expenses", Some(&token), &json!({ "amount": 74.0 })).await;

    let stats: Value = app
        .get("/dashboard/stats", Some(&token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total_sales"], 174.0);
    assert_eq!(stats["total_expenses"], 74.0);
    assert_eq!(stats["profit"], 100.0);
    assert_eq!(stats["total_outstanding"], 174.0);
    assert_eq!(stats["customers_count"], 1);
    assert_eq!(stats["invoices_count"], 1);
    assert_eq!(stats["products_count"], 1);
    assert_eq!(stats["low_stock_products"].as_array().unwrap().len(), 1);
}
