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

fn pet_goals_url(pet_id: i64) -> String {
    format!("/pets/{pet_id}/goals")
}

fn pet_overview_url(pet_id: i64) -> String {
    format!("/pets/{pet_id}/overview")
}

#[web::get("/{pet_id}/goals")]
async fn get_pet_goals(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let (pet, goals) = api::goal::get_pet_goals(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "goals/list.html",
        &cookie,
        Some(&logged_user),
        json!({
            "pet": pet,
            "goals": goals,
        }),
    )
}

#[web::post("/{pet_id}/goals")]
async fn add_goal(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::goal::GoalForm>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = path.0;

    match api::goal::add_goal(logged_user.user_id, pet_id, &form, &app_state.repo).await {
        Ok(goal) => utils::redirect_with_notice(
            &cookie,
            &pet_goals_url(goal.pet_id),
            NoticeLevel::Success,
            api::goal::MSG_GOAL_ADDED,
        ),
        Err(api::ApiError::Validation(msg)) => {
            utils::redirect_with_notice(&cookie, &pet_goals_url(pet_id), NoticeLevel::Error, msg)
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::post("/{goal_id}/progress")]
async fn update_goal_progress(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::goal::ProgressForm>,
) -> Result<impl web::Responder, web::Error> {
    let goal = api::goal::get_user_goal(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;
    let overview_url = pet_overview_url(goal.pet_id);

    match api::goal::update_progress(logged_user.user_id, goal, &form, &app_state.repo).await {
        Ok(goal) if goal.is_completed() => utils::redirect_with_notice(
            &cookie,
            &overview_url,
            NoticeLevel::Success,
            api::goal::MSG_GOAL_COMPLETED,
        ),
        Ok(_) => utils::redirect_with_notice(
            &cookie,
            &overview_url,
            NoticeLevel::Success,
            api::goal::MSG_PROGRESS_UPDATED,
        ),
        Err(api::ApiError::Validation(msg)) => {
            utils::redirect_with_notice(&cookie, &overview_url, NoticeLevel::Error, msg)
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/{goal_id}/complete")]
async fn complete_goal(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    match api::goal::complete_goal(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?
    {
        api::Completion::Done(goal) => utils::redirect_with_notice(
            &cookie,
            &pet_goals_url(goal.pet_id),
            NoticeLevel::Success,
            api::goal::MSG_GOAL_COMPLETED,
        ),
        api::Completion::AlreadyDone(goal) => utils::redirect_with_notice(
            &cookie,
            &pet_goals_url(goal.pet_id),
            NoticeLevel::Warning,
            api::goal::MSG_GOAL_ALREADY_COMPLETED,
        ),
    }
}

#[web::get("/{goal_id}/delete")]
async fn get_delete_goal_view(
    logged_user: session::WebAppSession,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let goal = api::goal::get_user_goal(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::render_page(
        "confirm_delete.html",
        &cookie,
        Some(&logged_user),
        json!({
            "title": "Excluir meta",
            "description": format!("A meta \"{}\" será excluída.", goal.description),
            "action_url": format!("/goals/{}/delete", goal.id),
            "cancel_url": pet_goals_url(goal.pet_id),
        }),
    )
}

#[web::post("/{goal_id}/delete")]
async fn delete_goal(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let goal = api::goal::delete_goal(logged_user.user_id, path.0, &app_state.repo)
        .await
        .map_err(errors::api_error)?;

    utils::redirect_with_notice(
        &cookie,
        &pet_goals_url(goal.pet_id),
        NoticeLevel::Success,
        api::goal::MSG_GOAL_DELETED,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        front::{routes, testing},
        models,
        repo::MockAppRepo,
    };
    use chrono::NaiveDate;
    use mockall::predicate::*;
    use ntex::{
        http::{StatusCode, header},
        web::test,
    };

    fn stored_goal(id: i64) -> models::goal::Goal {
        models::goal::Goal {
            id,
            pet_id: 4,
            user_app_id: testing::TUTOR_ID,
            description: "Perder 1kg".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            progress: 30,
            ..Default::default()
        }
    }

    async fn post_progress(
        mock_repo: MockAppRepo,
        progress: &str,
        signed: bool,
        with_token: bool,
    ) -> web::WebResponse {
        let app = test::init_service(
            web::App::new()
                .wrap(testing::session_middleware())
                .wrap(testing::identity_middleware())
                .state(testing::app_state(mock_repo))
                .route(testing::SIGN_IN_PATH, web::get().to(testing::sign_in))
                .configure(routes::goals),
        )
        .await;

        let mut request = test::TestRequest::post();
        if signed {
            let (cookies, token) = testing::signed_in(&app).await;
            let token = if with_token { token } else { "".into() };
            request = request
                .uri(&format!("/goals/9/progress?csrf_token={token}"))
                .header(header::COOKIE, cookies);
        } else {
            request = request.uri("/goals/9/progress");
        }

        test::call_service(
            &app,
            request.set_form(&[("progress", progress)]).to_request(),
        )
        .await
    }

    #[ntex::test]
    async fn test_progress_update_redirects_to_overview() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_goal_by_id()
            .with(eq(9))
            .times(1)
            .returning(|id| Ok(Some(stored_goal(id))));
        mock_repo
            .expect_set_goal_progress()
            .with(eq(9), eq(testing::TUTOR_ID), eq(60))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let response = post_progress(mock_repo, "60", true, true).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(testing::location_of(&response), "/pets/4/overview");
    }

    #[ntex::test]
    async fn test_invalid_progress_redirects_to_overview() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_goal_by_id()
            .returning(|id| Ok(Some(stored_goal(id))));
        mock_repo.expect_set_goal_progress().never();

        let response = post_progress(mock_repo, "150", true, true).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(testing::location_of(&response), "/pets/4/overview");
    }

    #[ntex::test]
    async fn test_progress_without_form_token_is_forbidden() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_goal_by_id().never();
        mock_repo.expect_set_goal_progress().never();

        let response = post_progress(mock_repo, "60", true, false).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[ntex::test]
    async fn test_progress_logged_out_goes_to_login() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_set_goal_progress().never();

        let response = post_progress(mock_repo, "60", false, false).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(testing::location_of(&response), "/login");
    }
}
