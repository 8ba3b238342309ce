#![allow(dead_code)]

use actix_web::web;
use chrono::NaiveDate;
use inventory_api::item::model::Item;
use inventory_api::AppState;

pub const API_URL: &str = "/items";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The five records every API test starts from, all packaged today.
pub fn fixture_items() -> Vec<Item> {
    let today = today();
    vec![
        Item::new(101, "RiceOrPAddy", 1025, today),
        Item::new(102, "Wheat", 2025, today),
        Item::new(103, "Barley", 3025, today),
        Item::new(104, "CocoSeed", 5025, today),
        Item::new(105, "CoffeeBean", 7025, today),
    ]
}

/// Fresh in-memory state seeded with `fixture_items`.
pub async fn seeded_state() -> web::Data<AppState> {
    let state = AppState::in_memory();
    for item in fixture_items() {
        state.store.save(&item).await.expect("Failed to seed item");
    }
    web::Data::new(state)
}

pub async fn clear(state: &web::Data<AppState>) {
    state
        .store
        .delete_all()
        .await
        .expect("Failed to clear item store");
}
