use ntex::web;
use serde_json::{Value, json};

use crate::{
    api,
    front::{
        AppState, errors, forms, middleware,
        session::{self, NoticeLevel},
        utils,
    },
    models,
};

/// Options of the event kind select
fn event_kinds() -> Value {
    models::event::EventKind::ALL
        .iter()
        .map(|kind| json!({ "value": kind.to_string(), "label": kind.label() }))
        .collect()
}

fn pet_events_url(pet_id: i64) -> String {
    format!("/pets/{pet_id}/events")
}

/// Events page of a pet with the add form
async fn render_pet_events(
    cookie: &ntex_session::Session,
    logged_user: &session::WebAppSession,
    app_state: &AppState,
    pet_id: i64,
    form: &forms::event::EventForm,
) -> Result<web::HttpResponse, web::Error> {
    let (pet, events) = api::event::get_pet_events(logged_user.user_id, pet_id, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "events/list.html",
        cookie,
        Some(logged_user),
        json!({
            "pet": pet,
            "events": events,
            "form": form,
            "kinds": event_kinds(),
        }),
    )
}

fn render_edit_event(
    cookie: &ntex_session::Session,
    logged_user: &session::WebAppSession,
    event: &models::event::Event,
    form: &forms::event::EventForm,
) -> Result<web::HttpResponse, web::Error> {
    utils::render_page(
        "events/edit.html",
        cookie,
        Some(logged_user),
        json!({
            "event_id": event.id,
            "pet_id": event.pet_id,
            "form": form,
            "kinds": event_kinds(),
        }),
    )
}

#[web::get("/{pet_id}/events")]
async fn get_pet_events(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    render_pet_events(
        &cookie,
        &logged_user,
        &app_state,
        path.0,
        &forms::event::EventForm::default(),
    )
    .await
}

#[web::post("/{pet_id}/events")]
async fn add_event(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::event::EventForm>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = path.0;

    match api::event::add_event(logged_user.user_id, pet_id, &form, &app_state.repo).await {
        Ok(event) => utils::redirect_with_notice(
            &cookie,
            &pet_events_url(event.pet_id),
            NoticeLevel::Success,
            api::event::MSG_EVENT_ADDED,
        ),
        Err(api::ApiError::Validation(msg)) => {
            session::push_notice(&cookie, NoticeLevel::Error, msg);
            render_pet_events(&cookie, &logged_user, &app_state, pet_id, &form).await
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/{event_id}/edit")]
async fn get_edit_event_form(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let event = api::event::get_user_event(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    render_edit_event(
        &cookie,
        &logged_user,
        &event,
        &forms::event::EventForm::from(&event),
    )
}

#[web::post("/{event_id}/edit")]
async fn edit_event(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::event::EventForm>,
) -> Result<impl web::Responder, web::Error> {
    let event_id = path.0;

    match api::event::update_event(logged_user.user_id, event_id, &form, &app_state.repo).await {
        Ok(event) => utils::redirect_with_notice(
            &cookie,
            &pet_events_url(event.pet_id),
            NoticeLevel::Success,
            api::event::MSG_EVENT_UPDATED,
        ),
        Err(api::ApiError::Validation(msg)) => {
            let event = api::event::get_user_event(logged_user.user_id, event_id, &app_state.repo)
                .await
                .map_err(errors::api_error)?;

            session::push_notice(&cookie, NoticeLevel::Error, msg);
            render_edit_event(&cookie, &logged_user, &event, &form)
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/{event_id}/delete")]
async fn get_delete_event_view(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let event = api::event::get_user_event(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "confirm_delete.html",
        &cookie,
        Some(&logged_user),
        json!({
            "title": "Excluir evento",
            "description": format!(
                "O evento {} de {} será excluído.",
                event.kind.label(),
                event.date.format("%d/%m/%Y")
            ),
            "action_url": format!("/events/{}/delete", event.id),
            "cancel_url": pet_events_url(event.pet_id),
        }),
    )
}

#[web::post("/{event_id}/delete")]
async fn delete_event(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let event = api::event::delete_event(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::redirect_with_notice(
        &cookie,
        &pet_events_url(event.pet_id),
        NoticeLevel::Success,
        api::event::MSG_EVENT_DELETED,
    )
}

#[web::get("/{event_id}/complete")]
async fn complete_event(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    match api::event::complete_event(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?
    {
        api::Completion::Done(event) => utils::redirect_with_notice(
            &cookie,
            &pet_events_url(event.pet_id),
            NoticeLevel::Success,
            api::event::MSG_EVENT_COMPLETED,
        ),
        api::Completion::AlreadyDone(event) => utils::redirect_with_notice(
            &cookie,
            &pet_events_url(event.pet_id),
            NoticeLevel::Warning,
            api::event::MSG_EVENT_ALREADY_COMPLETED,
        ),
    }
}

async fn render_select_pet(
    cookie: &ntex_session::Session,
    logged_user: &session::WebAppSession,
    app_state: &AppState,
) -> Result<web::HttpResponse, web::Error> {
    let pets = api::pet::get_user_pets(logged_user.user_id, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "events/select_pet.html",
        cookie,
        Some(logged_user),
        json!({ "pets": pets }),
    )
}

#[web::get("/select-pet")]
async fn get_select_pet_view(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    render_select_pet(&cookie, &logged_user, &app_state).await
}

#[web::post("/select-pet")]
async fn select_pet(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    form: web::types::Form<forms::event::SelectPetForm>,
) -> Result<impl web::Responder, web::Error> {
    match api::event::select_pet(logged_user.user_id, &form, &app_state.repo).await {
        Ok(pet) => utils::redirect_to(&pet_events_url(pet.id)),
        Err(api::ApiError::Validation(msg)) => {
            session::push_notice(&cookie, NoticeLevel::Error, msg);
            render_select_pet(&cookie, &logged_user, &app_state).await
        }
        Err(e) => Err(errors::api_error(e)),
    }
}
