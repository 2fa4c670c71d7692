//! # Event API Module
//!
//! Veterinary events of a pet: vaccines, consultations, medications,
//! hygiene and anything else worth logging.

use super::{ApiError, ApiResult, Completion, DATE_INPUT_FORMAT, access, clean_field};
use crate::{front, metric, models, repo};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

pub const MSG_REQUIRED_FIELDS: &str = "Os campos Tipo de Evento e Data são obrigatórios.";
pub const MSG_INVALID_KIND: &str = "Tipo de evento inválido.";
pub const MSG_INVALID_DATE: &str = "A data do evento é inválida.";
pub const MSG_SELECT_PET: &str = "Você precisa selecionar um pet.";
pub const MSG_EVENT_ADDED: &str = "Evento adicionado com sucesso!";
pub const MSG_EVENT_UPDATED: &str = "Evento atualizado com sucesso!";
pub const MSG_EVENT_DELETED: &str = "Evento excluído com sucesso.";
pub const MSG_EVENT_COMPLETED: &str = "Evento concluído!";
pub const MSG_EVENT_ALREADY_COMPLETED: &str = "Esse evento já foi concluído.";

#[derive(Debug, Serialize, PartialEq)]
pub struct EventSchema {
    pub id: i64,
    pub pet_id: i64,
    pub kind: models::event::EventKind,
    pub kind_label: &'static str,
    pub date: NaiveDate,
    pub notes: String,
    pub completed: bool,
}

impl From<models::event::Event> for EventSchema {
    fn from(event: models::event::Event) -> Self {
        Self {
            id: event.id,
            pet_id: event.pet_id,
            kind: event.kind,
            kind_label: event.kind.label(),
            date: event.date,
            notes: event.notes.unwrap_or_default(),
            completed: event.completed,
        }
    }
}

struct ValidEvent {
    kind: models::event::EventKind,
    date: NaiveDate,
    notes: Option<String>,
}

fn validate_event_form(form: &front::forms::event::EventForm) -> ApiResult<ValidEvent> {
    if form.kind.trim().is_empty() || form.date.trim().is_empty() {
        return Err(ApiError::Validation(MSG_REQUIRED_FIELDS.into()));
    }

    let kind = form
        .kind
        .parse()
        .map_err(|_| ApiError::Validation(MSG_INVALID_KIND.into()))?;
    let date = NaiveDate::parse_from_str(form.date.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| ApiError::Validation(MSG_INVALID_DATE.into()))?;
    let notes = clean_field(&form.notes);

    Ok(ValidEvent {
        kind,
        date,
        notes: (!notes.is_empty()).then_some(notes),
    })
}

/// Retrieves the pet and its events, newest date first.
pub async fn get_pet_events(
    user_id: i64,
    pet_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<(models::pet::Pet, Vec<EventSchema>)> {
    let pet = access::owned_pet(user_id, pet_id, repo).await?;

    let mut events = repo.get_pet_events(pet.id).await?;
    events.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    Ok((pet, events.into_iter().map(Into::into).collect()))
}

/// Retrieves an event of the tutor.
pub async fn get_user_event(
    user_id: i64,
    event_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::event::Event> {
    access::owned_event(user_id, event_id, repo).await
}

/// Validates the form and logs a new event for a pet of the tutor.
pub async fn add_event(
    user_id: i64,
    pet_id: i64,
    form: &front::forms::event::EventForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::event::Event> {
    let _span = logfire::span!("add_event").entered();

    let pet = access::owned_pet(user_id, pet_id, repo).await?;
    let valid = validate_event_form(form)?;

    let mut event = models::event::Event {
        id: 0,
        pet_id: pet.id,
        user_app_id: pet.user_app_id,
        kind: valid.kind,
        date: valid.date,
        notes: valid.notes,
        completed: false,
        created_at: Utc::now(),
    };
    event.id = repo.insert_event(&event).await?;

    metric::incr_event_action_statds("add_event");
    Ok(event)
}

/// Validates the form and updates an event of the tutor.
///
/// The completion flag is kept as it is.
pub async fn update_event(
    user_id: i64,
    event_id: i64,
    form: &front::forms::event::EventForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::event::Event> {
    let event = access::owned_event(user_id, event_id, repo).await?;
    let valid = validate_event_form(form)?;

    let event = models::event::Event {
        kind: valid.kind,
        date: valid.date,
        notes: valid.notes,
        ..event
    };
    repo.update_event(&event).await?;

    metric::incr_event_action_statds("update_event");
    Ok(event)
}

pub async fn delete_event(
    user_id: i64,
    event_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::event::Event> {
    let event = access::owned_event(user_id, event_id, repo).await?;

    repo.delete_event(event.id, user_id).await?;

    metric::incr_event_action_statds("delete_event");
    Ok(event)
}

/// Marks an event as completed. Completion can't be undone.
pub async fn complete_event(
    user_id: i64,
    event_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<Completion<models::event::Event>> {
    let event = access::owned_event(user_id, event_id, repo).await?;

    if event.completed {
        return Ok(Completion::AlreadyDone(event));
    }

    repo.set_event_as_completed(event.id, user_id).await?;

    metric::incr_event_action_statds("complete_event");
    Ok(Completion::Done(models::event::Event {
        completed: true,
        ..event
    }))
}

/// Resolves the pet chosen in the pet selection form.
pub async fn select_pet(
    user_id: i64,
    form: &front::forms::event::SelectPetForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::pet::Pet> {
    let pet_id = form
        .pet_id
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::Validation(MSG_SELECT_PET.into()))?;

    access::owned_pet(user_id, pet_id, repo).await
}
