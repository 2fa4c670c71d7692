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

fn pet_shopping_url(pet_id: i64) -> String {
    format!("/pets/{pet_id}/shopping")
}

#[web::get("/{pet_id}/shopping")]
async fn get_pet_shopping_list(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let (pet, shopping_list) =
        api::shopping::get_pet_shopping_list(logged_user.user_id, path.0, &app_state.repo)
            .await
            .map_err(errors::api_error)?;

    utils::render_page(
        "shopping/list.html",
        &cookie,
        Some(&logged_user),
        json!({
            "pet": pet,
            "shopping_list": shopping_list,
        }),
    )
}

#[web::post("/{pet_id}/shopping")]
async fn add_shopping_item(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::shopping::ShoppingItemForm>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = path.0;

    match api::shopping::add_shopping_item(logged_user.user_id, pet_id, &form, &app_state.repo)
        .await
    {
        Ok(_) => utils::redirect_with_notice(
            &cookie,
            &pet_shopping_url(pet_id),
            NoticeLevel::Success,
            api::shopping::MSG_ITEM_ADDED,
        ),
        Err(api::ApiError::Validation(msg)) => utils::redirect_with_notice(
            &cookie,
            &pet_shopping_url(pet_id),
            NoticeLevel::Error,
            msg,
        ),
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/{item_id}/toggle")]
async fn toggle_shopping_item(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let item = api::shopping::toggle_purchased(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    let (level, text) = if item.purchased {
        (NoticeLevel::Success, api::shopping::MSG_ITEM_PURCHASED)
    } else {
        (NoticeLevel::Info, api::shopping::MSG_ITEM_TO_BUY)
    };

    utils::redirect_with_notice(&cookie, &pet_shopping_url(item.pet_id), level, text)
}

#[web::get("/{item_id}/delete")]
async fn get_delete_shopping_item_view(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let item = api::shopping::get_user_shopping_item(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "confirm_delete.html",
        &cookie,
        Some(&logged_user),
        json!({
            "title": "Remover item",
            "description": format!("O item \"{}\" será removido da lista de compras.", item.description),
            "action_url": format!("/shopping/{}/delete", item.id),
            "cancel_url": pet_shopping_url(item.pet_id),
        }),
    )
}

#[web::post("/{item_id}/delete")]
async fn delete_shopping_item(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let item = api::shopping::delete_shopping_item(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::redirect_with_notice(
        &cookie,
        &pet_shopping_url(item.pet_id),
        NoticeLevel::Success,
        api::shopping::MSG_ITEM_DELETED,
    )
}
