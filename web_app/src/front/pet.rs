use chrono::Utc;
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

/// Pet form page, `pet_id` is set when editing
fn render_pet_form(
    cookie: &ntex_session::Session,
    logged_user: &session::WebAppSession,
    pet_id: Option<i64>,
    form: &forms::pet::PetForm,
) -> Result<web::HttpResponse, web::Error> {
    utils::render_page(
        "pets/form.html",
        cookie,
        Some(logged_user),
        json!({
            "pet_id": pet_id,
            "form": form,
        }),
    )
}

#[web::get("/")]
async fn user_pets_list(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let pets = api::pet::get_user_pets(logged_user.user_id, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "pets/list.html",
        &cookie,
        Some(&logged_user),
        json!({ "pets": pets }),
    )
}

#[web::get("/new")]
async fn get_new_pet_form(
    logged_user: session::WebAppSession,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    render_pet_form(&cookie, &logged_user, None, &forms::pet::PetForm::default())
}

#[web::post("/new")]
async fn create_pet(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    form: web::types::Form<forms::pet::PetForm>,
) -> Result<impl web::Responder, web::Error> {
    match api::pet::create_pet(logged_user.user_id, &form, &app_state.repo).await {
        Ok(pet) => utils::redirect_with_notice(
            &cookie,
            "/pets/",
            NoticeLevel::Success,
            api::pet::msg_pet_created(&pet.name),
        ),
        Err(api::ApiError::Validation(msg)) => {
            session::push_notice(&cookie, NoticeLevel::Error, msg);
            render_pet_form(&cookie, &logged_user, None, &form)
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/{pet_id}/edit")]
async fn get_edit_pet_form(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::pet::get_user_pet(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    render_pet_form(
        &cookie,
        &logged_user,
        Some(pet.id),
        &forms::pet::PetForm::from(&pet),
    )
}

#[web::post("/{pet_id}/edit")]
async fn edit_pet(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::pet::PetForm>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = path.0;

    match api::pet::update_pet(logged_user.user_id, pet_id, &form, &app_state.repo).await {
        Ok(pet) => utils::redirect_with_notice(
            &cookie,
            "/pets/",
            NoticeLevel::Success,
            api::pet::msg_pet_updated(&pet.name),
        ),
        Err(api::ApiError::Validation(msg)) => {
            session::push_notice(&cookie, NoticeLevel::Error, msg);
            render_pet_form(&cookie, &logged_user, Some(pet_id), &form)
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/{pet_id}/delete")]
async fn get_delete_pet_view(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::pet::get_user_pet(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "confirm_delete.html",
        &cookie,
        Some(&logged_user),
        json!({
            "title": format!("Excluir {}", pet.name),
            "description": format!("O pet {} e todos os seus eventos, metas e itens de compra serão excluídos.", pet.name),
            "action_url": format!("/pets/{}/delete", pet.id),
            "cancel_url": "/pets/",
        }),
    )
}

#[web::post("/{pet_id}/delete")]
async fn delete_pet(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::pet::delete_pet(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::redirect_with_notice(
        &cookie,
        "/pets/",
        NoticeLevel::Success,
        api::pet::msg_pet_deleted(&pet.name),
    )
}

#[web::get("/{pet_id}/overview")]
async fn get_pet_overview(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let overview = api::pet::get_pet_overview(
        logged_user.user_id,
        path.0,
        Utc::now().date_naive(),
        &app_state.repo,
    )
    .await
    .map_err(errors::api_error)?;

    if overview.has_no_records() {
        session::push_notice(
            &cookie,
            NoticeLevel::Info,
            api::pet::msg_pet_without_records(&overview.pet.name),
        );
    }

    utils::render_page(
        "pets/overview.html",
        &cookie,
        Some(&logged_user),
        json!({ "overview": overview }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        front::{routes, testing},
        repo::MockAppRepo,
    };
    use ntex::{
        http::{StatusCode, header},
        web::test,
    };

    #[ntex::test]
    async fn test_invalid_pet_form_is_rendered_again_with_the_values() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_insert_pet().never();

        let app = test::init_service(
            web::App::new()
                .wrap(testing::session_middleware())
                .wrap(testing::identity_middleware())
                .state(testing::app_state(mock_repo))
                .route(testing::SIGN_IN_PATH, web::get().to(testing::sign_in))
                .configure(routes::pets),
        )
        .await;
        let (cookies, token) = testing::signed_in(&app).await;

        let request = test::TestRequest::post()
            .uri(&format!("/pets/new?csrf_token={token}"))
            .header(header::COOKIE, cookies)
            .set_form(&[
                ("name", "Bolinha"),
                ("species", "Gato"),
                ("breed", ""),
                ("birthday", "2021-08-01"),
                ("weight", "0"),
            ])
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();
        assert!(body.contains(r#"value="Bolinha""#));
        assert!(body.contains(r#"value="2021-08-01""#));
        assert!(body.contains(api::pet::MSG_WEIGHT_NOT_POSITIVE));
    }
}
