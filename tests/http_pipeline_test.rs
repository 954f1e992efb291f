use std::sync::Arc;

use chrono::NaiveDate;
use fitmenu::error::AppError;
use fitmenu::models::{Config, DailyTargets, DayMenu, Macro, Menu};
use fitmenu::pipeline;
use fitmenu::utils::http;
use httpmock::prelude::*;

const LISTING: &str = r#"
<html><body>
  <div class="menu-item-wrap"><div class="content">
    <h2><a href="/p/omleta">Omleta</a></h2>
    <a class="btn" onclick="adauga_in_cos(10, 'produs')">Adauga</a>
  </div></div>
  <div class="menu-item-wrap"><div class="content">
    <h2><a href="/p/pui-cu-orez">Pui cu orez</a></h2>
    <a class="btn" onclick="adauga_in_cos(20, 'produs')">Adauga</a>
  </div></div>
</body></html>
"#;

fn product_page(name: &str, price: &str, rows: [&str; 6]) -> String {
    format!(
        r#"<html><body>
          <div class="banner-text"><h1>{name}</h1></div>
          <div class="price">{price} Lei</div>
          <div class="amount-per-serving">
            <div>Gramaj: {}</div>
            <div>Valoare energetica: {} kcal</div>
            <div>Carbohidrati: {} g</div>
            <div>Grasimi: {} g</div>
            <div>Proteine: {} g</div>
            <div>Fibre: {} g</div>
          </div>
        </body></html>"#,
        rows[0], rows[1], rows[2], rows[3], rows[4], rows[5]
    )
}

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.site.base_url = server.base_url();
    config.pricing.off = 10.0;
    config.menu = Menu::new(vec![
        DayMenu::new("Monday", [10, 20]),
        DayMenu::new("Tuesday", [20]),
    ]);
    config
}

async fn mock_site(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/produse");
            then.status(200).body(LISTING);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/p/omleta");
            then.status(200)
                .body(product_page("Omleta", "20", ["250", "300", "10", "20", "25", "3"]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/p/pui-cu-orez");
            then.status(200).body(product_page(
                "Pui cu orez",
                "30,00",
                ["350", "420", "40,5", "12", "40", "6"],
            ));
        })
        .await;
}

#[tokio::test]
async fn test_report_over_http() {
    let server = MockServer::start_async().await;
    mock_site(&server).await;

    let config = Arc::new(config_for(&server));
    let client = http::create_client(&config.crawler).unwrap();

    let catalog = pipeline::run_catalog(Arc::clone(&config), &client)
        .await
        .unwrap();
    assert_eq!(catalog.len(), 2);
    assert!((catalog.get("10").unwrap().price - 18.0).abs() < 1e-9);
    assert!((catalog.get("20").unwrap().price - 27.0).abs() < 1e-9);

    let totals = pipeline::report_menu(&config, &catalog).unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].menu, vec!["Omleta", "Pui cu orez"]);
    assert_eq!(format!("{:.2}", totals[0].price), "45.00");
    assert_eq!(
        totals[0].macros,
        Macro::from_ordered(&[600.0, 720.0, 50.5, 32.0, 65.0, 9.0])
    );
    assert_eq!(totals[1].menu, vec!["Pui cu orez"]);
}

#[tokio::test]
async fn test_failed_product_page_aborts_catalog() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/produse");
            then.status(200).body(LISTING);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/p/omleta");
            then.status(200)
                .body(product_page("Omleta", "20", ["250", "300", "10", "20", "25", "3"]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/p/pui-cu-orez");
            then.status(500);
        })
        .await;

    let config = Arc::new(config_for(&server));
    let client = http::create_client(&config.crawler).unwrap();

    let result = pipeline::run_catalog(config, &client).await;
    assert!(matches!(result, Err(AppError::Http(_))));
}

#[tokio::test]
async fn test_report_fails_on_unknown_product() {
    let server = MockServer::start_async().await;
    mock_site(&server).await;

    let mut config = config_for(&server);
    config.menu = Menu::new(vec![DayMenu::new("Monday", [10, 99])]);
    let config = Arc::new(config);
    let client = http::create_client(&config.crawler).unwrap();

    let result = pipeline::run_report(config, &client).await;
    assert!(matches!(result, Err(AppError::Lookup { .. })));
}

#[tokio::test]
async fn test_basket_fill_posts_forms() {
    let server = MockServer::start_async().await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/comanda/adauga_in_cos")
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("tip=produs");
            then.status(200);
        })
        .await;
    let discount = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cos/adauga_cod")
                .body_contains("cod_reducere=WELCOME");
            then.status(200);
        })
        .await;

    let config = Arc::new(config_for(&server));
    let client = http::create_client(&config.crawler).unwrap();
    // 2023-02-06 is a Monday: Monday and Tuesday are ordered.
    let start = NaiveDate::from_ymd_opt(2023, 2, 6).unwrap();

    let outcome = pipeline::run_basket(Arc::clone(&config), &client, 2, start, "WELCOME")
        .await
        .unwrap();

    assert_eq!(outcome.days_filled, 2);
    assert_eq!(outcome.requests, 4);
    assert_eq!(outcome.failures, 0);
    assert!(outcome.discount_applied);
    add.assert_hits_async(3).await;
    discount.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_basket_failures_are_logged_not_fatal() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/comanda/adauga_in_cos");
            then.status(500);
        })
        .await;
    let discount = server
        .mock_async(|when, then| {
            when.method(POST).path("/cos/adauga_cod");
            then.status(200);
        })
        .await;

    let config = Arc::new(config_for(&server));
    let client = http::create_client(&config.crawler).unwrap();
    let start = NaiveDate::from_ymd_opt(2023, 2, 6).unwrap();

    let outcome = pipeline::run_basket(Arc::clone(&config), &client, 1, start, "WELCOME")
        .await
        .unwrap();

    assert_eq!(outcome.days_filled, 1);
    assert_eq!(outcome.failures, 2);
    assert!(outcome.discount_applied);
    discount.assert_hits_async(1).await;
}

const PROGRAM_PAGE: &str = r##"
<html><body>
  <div class="btn-detalii">
    <a href="#" onclick="detalii_meniu(1482, '2023-02-06', '3')">Detalii</a>
  </div>
</body></html>
"##;

const MENU_DETAILS: &str = "<html><body><div class=\"modal-body\"><h4>Meniul zilei</h4>\
<p>\n-Omleta cu legume</p><p>\nGramaj: 250g</p><p>\n320 kcal</p><p>\nproteine: 22g</p>\
<p>\nPranz: piept de pui cu orez</p><p>\nGramaj: 400g</p><p>\n610 kcal</p><p>\nproteine: 48g</p>\
</div></body></html>";

#[tokio::test]
async fn test_program_menu_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/programe/creste-masa-musculara");
            then.status(200).body(PROGRAM_PAGE);
        })
        .await;
    let details = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fitfoodway/detalii_meniu")
                .body_contains("id=1482")
                .body_contains("data=2023-02-06")
                .body_contains("program_id=3");
            then.status(200).body(MENU_DETAILS);
        })
        .await;

    let mut config = config_for(&server);
    config.targets = Some(DailyTargets {
        kcal: 2500.0,
        proteins: 180.0,
    });
    let client = http::create_client(&config.crawler).unwrap();

    let menu = pipeline::run_program(&config, &client).await.unwrap();

    details.assert_hits_async(1).await;
    assert_eq!(menu.date, "2023-02-06");
    assert_eq!(menu.foods.len(), 2);
    assert_eq!(menu.foods[1].description, "Pranz: piept de pui cu orez");
    assert_eq!(menu.total_kcal(), 930.0);
    assert_eq!(menu.total_proteins(), 70.0);
}

#[tokio::test]
async fn test_program_page_without_details_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/programe/creste-masa-musculara");
            then.status(200).body("<html><body></body></html>");
        })
        .await;

    let config = config_for(&server);
    let client = http::create_client(&config.crawler).unwrap();

    let result = pipeline::run_program(&config, &client).await;
    assert!(matches!(result, Err(AppError::Extract { .. })));
}
