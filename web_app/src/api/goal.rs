//! # Goal API Module
//!
//! Care goals of a pet. A goal tracks its progress from 0 to 100 and counts
//! as completed once it reaches [`models::goal::COMPLETED_PROGRESS`].

use super::{ApiError, ApiResult, Completion, DATE_INPUT_FORMAT, access, clean_field};
use crate::{front, metric, models, repo};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

pub const MSG_REQUIRED_FIELDS: &str = "Preencha a descrição e a data para adicionar a meta.";
pub const MSG_INVALID_DUE_DATE: &str = "A data da meta é inválida.";
pub const MSG_INVALID_PROGRESS: &str = "O progresso deve ser um número inteiro entre 0 e 100.";
pub const MSG_GOAL_ADDED: &str = "Meta adicionada!";
pub const MSG_PROGRESS_UPDATED: &str = "Progresso da meta atualizado!";
pub const MSG_GOAL_COMPLETED: &str = "Meta marcada como concluída! Bom trabalho!";
pub const MSG_GOAL_ALREADY_COMPLETED: &str = "Essa meta já foi concluída.";
pub const MSG_GOAL_DELETED: &str = "Meta excluída com sucesso.";

#[derive(Debug, Serialize, PartialEq)]
pub struct GoalSchema {
    pub id: i64,
    pub pet_id: i64,
    pub description: String,
    pub due_date: NaiveDate,
    pub progress: u8,
    pub is_completed: bool,
}

impl From<models::goal::Goal> for GoalSchema {
    fn from(goal: models::goal::Goal) -> Self {
        Self {
            is_completed: goal.is_completed(),
            id: goal.id,
            pet_id: goal.pet_id,
            description: goal.description,
            due_date: goal.due_date,
            progress: goal.progress,
        }
    }
}

/// Parses a progress value, only integers between 0 and 100 are valid
fn parse_progress(value: &str) -> ApiResult<u8> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|progress| (0..=models::goal::COMPLETED_PROGRESS as i64).contains(progress))
        .and_then(|progress| u8::try_from(progress).ok())
        .ok_or_else(|| ApiError::Validation(MSG_INVALID_PROGRESS.into()))
}

/// Retrieves the pet and its goals, least progressed and soonest due first.
pub async fn get_pet_goals(
    user_id: i64,
    pet_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<(models::pet::Pet, Vec<GoalSchema>)> {
    let pet = access::owned_pet(user_id, pet_id, repo).await?;

    let mut goals = repo.get_pet_goals(pet.id).await?;
    goals.sort_by(|a, b| {
        a.progress
            .cmp(&b.progress)
            .then(a.due_date.cmp(&b.due_date))
    });

    Ok((pet, goals.into_iter().map(Into::into).collect()))
}

pub async fn get_user_goal(
    user_id: i64,
    goal_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::goal::Goal> {
    access::owned_goal(user_id, goal_id, repo).await
}

/// Adds a goal with no progress to a pet of the tutor.
pub async fn add_goal(
    user_id: i64,
    pet_id: i64,
    form: &front::forms::goal::GoalForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::goal::Goal> {
    let _span = logfire::span!("add_goal").entered();

    let pet = access::owned_pet(user_id, pet_id, repo).await?;

    let description = clean_field(&form.description);
    if description.is_empty() || form.due_date.trim().is_empty() {
        return Err(ApiError::Validation(MSG_REQUIRED_FIELDS.into()));
    }
    let due_date = NaiveDate::parse_from_str(form.due_date.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| ApiError::Validation(MSG_INVALID_DUE_DATE.into()))?;

    let mut goal = models::goal::Goal {
        id: 0,
        pet_id: pet.id,
        user_app_id: pet.user_app_id,
        description,
        due_date,
        progress: 0,
        created_at: Utc::now(),
    };
    goal.id = repo.insert_goal(&goal).await?;

    metric::incr_goal_action_statds("add_goal");
    Ok(goal)
}

/// Sets the progress of a goal of the tutor.
///
/// `goal` is the one returned by [`get_user_goal`], the write is scoped to
/// `user_id` again in the repository.
///
/// # Errors
/// [`ApiError::Validation`] for anything that isn't an integer between 0
/// and 100, the goal is left untouched.
pub async fn update_progress(
    user_id: i64,
    goal: models::goal::Goal,
    form: &front::forms::goal::ProgressForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::goal::Goal> {
    let progress = parse_progress(&form.progress)?;

    repo.set_goal_progress(goal.id, user_id, progress).await?;

    metric::incr_goal_action_statds("update_progress");
    Ok(models::goal::Goal { progress, ..goal })
}

/// Takes the progress of a goal straight to completion.
pub async fn complete_goal(
    user_id: i64,
    goal_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<Completion<models::goal::Goal>> {
    let goal = access::owned_goal(user_id, goal_id, repo).await?;

    if goal.is_completed() {
        return Ok(Completion::AlreadyDone(goal));
    }

    repo.set_goal_progress(goal.id, user_id, models::goal::COMPLETED_PROGRESS)
        .await?;

    metric::incr_goal_action_statds("complete_goal");
    Ok(Completion::Done(models::goal::Goal {
        progress: models::goal::COMPLETED_PROGRESS,
        ..goal
    }))
}

pub async fn delete_goal(
    user_id: i64,
    goal_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::goal::Goal> {
    let goal = access::owned_goal(user_id, goal_id, repo).await?;

    repo.delete_goal(goal.id, user_id).await?;

    metric::incr_goal_action_statds("delete_goal");
    Ok(goal)
}
