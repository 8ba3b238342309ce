use actix_web::{
    error::InternalError,
    web::{self, Json, Path},
    HttpResponse,
};
use log::{debug, info, warn};

use crate::error::ApiError;
use crate::item::model::{Item, LookupKey};
use crate::{AppState, ErrorResponse};

fn ensure_valid(item: &Item) -> Result<(), ApiError> {
    item.validate().map_err(|e| {
        warn!("Rejected item {}: {}", item.icode, e);
        ApiError::BadRequest(e)
    })
}

fn parse_code(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid item code: {}", raw)))
}

fn parse_price(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid price bound: {}", raw)))
}

#[utoipa::path(
    get,
    path = "/items",
    tag = "Item Service",
    responses(
        (status = 200, description = "List of all items", body = [Item])
    )
)]
pub async fn get_all_items(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let items = state.store.find_all().await?;
    debug!("Listing {} items", items.len());
    Ok(HttpResponse::Ok().json(items))
}

/// Looks an item up by code, package date or title, depending on what the
/// segment parses as. A date lookup always answers with a (possibly empty) list.
#[utoipa::path(
    get,
    path = "/items/{key}",
    tag = "Item Service",
    params(
        ("key" = String, Path, description = "Item code, ISO package date (YYYY-MM-DD) or title")
    ),
    responses(
        (status = 200, description = "Item found by code or title, or the items packaged on the given date", body = Item),
        (status = 404, description = "No item with that code or title", body = ErrorResponse)
    )
)]
pub async fn get_item_by_key(
    state: web::Data<AppState>,
    path: Path<String>,
) -> Result<HttpResponse, ApiError> {
    let raw = path.into_inner();
    match LookupKey::parse(&raw) {
        LookupKey::Code(icode) => {
            debug!("Looking up item by code {}", icode);
            let item = state
                .store
                .find_by_id(icode)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Item {} not found", icode)))?;
            Ok(HttpResponse::Ok().json(item))
        }
        LookupKey::PackageDate(date) => {
            debug!("Looking up items packaged on {}", date);
            let items = state.store.find_by_package_date(date).await?;
            Ok(HttpResponse::Ok().json(items))
        }
        LookupKey::Title(title) => {
            debug!("Looking up item by title {:?}", title);
            let item = state
                .store
                .find_by_title(&title)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Item titled {:?} not found", title)))?;
            Ok(HttpResponse::Ok().json(item))
        }
    }
}

#[utoipa::path(
    get,
    path = "/items/priceBetween/{low}/and/{high}",
    tag = "Item Service",
    params(
        ("low" = i64, Path, description = "Lowest price, inclusive"),
        ("high" = i64, Path, description = "Highest price, inclusive")
    ),
    responses(
        (status = 200, description = "Items priced within the range", body = [Item]),
        (status = 400, description = "A bound is not an integer", body = ErrorResponse)
    )
)]
pub async fn get_items_by_price_range(
    state: web::Data<AppState>,
    path: Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (low, high) = path.into_inner();
    let (low, high) = (parse_price(&low)?, parse_price(&high)?);
    let items = state.store.find_by_price_between(low, high).await?;
    debug!("{} items priced between {} and {}", items.len(), low, high);
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    post,
    path = "/items",
    tag = "Item Service",
    request_body = Item,
    responses(
        (status = 200, description = "Item created successfully", body = Item),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 409, description = "An item with that code already exists", body = ErrorResponse)
    )
)]
pub async fn create_item(
    state: web::Data<AppState>,
    item: Json<Item>,
) -> Result<HttpResponse, ApiError> {
    let item = item.into_inner();
    ensure_valid(&item)?;

    let saved = match state.store.insert(&item).await? {
        Some(saved) => saved,
        None => {
            warn!("Refusing to create duplicate item {}", item.icode);
            return Err(ApiError::Conflict(format!(
                "Item {} already exists",
                item.icode
            )));
        }
    };
    info!("Created item {} ({})", saved.icode, saved.title);
    Ok(HttpResponse::Ok().json(saved))
}

#[utoipa::path(
    put,
    path = "/items",
    tag = "Item Service",
    request_body = Item,
    responses(
        (status = 200, description = "Item replaced successfully", body = Item),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 404, description = "No item with that code", body = ErrorResponse)
    )
)]
pub async fn update_item(
    state: web::Data<AppState>,
    item: Json<Item>,
) -> Result<HttpResponse, ApiError> {
    let item = item.into_inner();
    ensure_valid(&item)?;

    let saved = state
        .store
        .update(&item)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item {} not found", item.icode)))?;
    info!("Updated item {}", saved.icode);
    Ok(HttpResponse::Ok().json(saved))
}

#[utoipa::path(
    delete,
    path = "/items/{key}",
    tag = "Item Service",
    params(
        ("key" = i32, Path, description = "Code of the item to delete")
    ),
    responses(
        (status = 200, description = "Item deleted successfully"),
        (status = 400, description = "Code is not an integer", body = ErrorResponse),
        (status = 404, description = "No item with that code", body = ErrorResponse)
    )
)]
pub async fn delete_item(
    state: web::Data<AppState>,
    path: Path<String>,
) -> Result<HttpResponse, ApiError> {
    let icode = parse_code(&path.into_inner())?;
    if !state.store.delete_by_id(icode).await? {
        return Err(ApiError::NotFound(format!("Item {} not found", icode)));
    }
    info!("Deleted item {}", icode);
    Ok(HttpResponse::Ok().finish())
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        warn!("Rejected item body: {}", message);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)),
        )
        .into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/items")
                .route(web::get().to(get_all_items))
                .route(web::post().to(create_item))
                .route(web::put().to(update_item)),
        )
        .service(
            web::resource("/items/priceBetween/{low}/and/{high}")
                .route(web::get().to(get_items_by_price_range)),
        )
        .service(
            web::resource("/items/{key}")
                .route(web::get().to(get_item_by_key))
                .route(web::delete().to(delete_item)),
        );
}
