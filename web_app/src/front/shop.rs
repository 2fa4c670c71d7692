use ntex::web;
use serde_json::json;

use crate::{
    api,
    front::{
        AppState, errors, forms, middleware,
        session::{self, NoticeLevel},
        utils,
    },
};

fn store_cart(cookie: &ntex_session::Session, cart: &api::shop::Cart) -> Result<(), web::Error> {
    session::save_cart(cookie, cart)
        .map_err(|e| errors::ServerError::InternalServerError(e.to_string()).into())
}

#[web::get("/shop")]
async fn get_shop_view(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let products = api::shop::get_catalog(&app_state.repo)
        .await
        .map_err(errors::api_error)?;
    let cart = session::load_cart(&cookie);

    utils::render_page(
        "shop/catalog.html",
        &cookie,
        Some(&logged_user),
        json!({
            "products": products,
            "cart_items": cart.item_count(),
        }),
    )
}

#[web::get("/cart")]
async fn get_cart_view(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let cart = session::load_cart(&cookie);
    let summary = api::shop::get_cart_summary(&cart, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "shop/cart.html",
        &cookie,
        Some(&logged_user),
        json!({
            "is_empty": summary.is_empty(),
            "cart": summary,
        }),
    )
}

#[web::post("/cart/add/{product_id}")]
async fn add_to_cart(
    _: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::shop::AddToCartForm>,
) -> Result<impl web::Responder, web::Error> {
    let mut cart = session::load_cart(&cookie);

    match api::shop::add_to_cart(&mut cart, path.0, &form, &app_state.repo).await {
        Ok(product) => {
            store_cart(&cookie, &cart)?;
            utils::redirect_with_notice(
                &cookie,
                "/shop",
                NoticeLevel::Success,
                api::shop::msg_added_to_cart(&product.name),
            )
        }
        Err(api::ApiError::Validation(msg) | api::ApiError::Conflict(msg)) => {
            utils::redirect_with_notice(&cookie, "/shop", NoticeLevel::Error, msg)
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::post("/cart/remove/{product_id}")]
async fn remove_from_cart(
    _: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let mut cart = session::load_cart(&cookie);

    if !cart.remove(path.0) {
        return utils::redirect_to("/cart");
    }

    store_cart(&cookie, &cart)?;
    utils::redirect_with_notice(
        &cookie,
        "/cart",
        NoticeLevel::Info,
        api::shop::MSG_ITEM_REMOVED,
    )
}

#[web::post("/checkout")]
async fn checkout(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let mut cart = session::load_cart(&cookie);

    match api::shop::checkout(&mut cart, &app_state.repo).await {
        Ok(()) => {
            store_cart(&cookie, &cart)?;
            log::info!("user {} completed a purchase", logged_user.user_id);
            utils::redirect_with_notice(
                &cookie,
                "/purchase-success",
                NoticeLevel::Success,
                api::shop::MSG_PURCHASE_DONE,
            )
        }
        Err(api::ApiError::Conflict(msg)) => {
            utils::redirect_with_notice(&cookie, "/cart", NoticeLevel::Error, msg)
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/purchase-success")]
async fn get_purchase_success_view(
    logged_user: session::WebAppSession,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    utils::render_page(
        "shop/purchase_success.html",
        &cookie,
        Some(&logged_user),
        json!({}),
    )
}
