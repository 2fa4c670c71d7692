//! # Pet API Module
//!
//! Pet records of a tutor: validation of the pet form, CRUD operations and
//! the overview page with the derived statistics of a pet.

use super::{ApiError, ApiResult, DATE_INPUT_FORMAT, access, clean_field, event, goal};
use crate::{consts, front, metric, models, repo};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

pub const MSG_REQUIRED_FIELDS: &str =
    "Os campos Nome, Espécie, Data de Nascimento e Peso são obrigatórios.";
pub const MSG_WEIGHT_NOT_POSITIVE: &str = "O peso deve ser um valor positivo.";
pub const MSG_WEIGHT_INVALID: &str = "O valor do peso é inválido.";
pub const MSG_BIRTHDAY_INVALID: &str = "A data de nascimento é inválida.";

pub fn msg_pet_created(name: &str) -> String {
    format!("Pet {name} adicionado com sucesso!")
}

pub fn msg_pet_updated(name: &str) -> String {
    format!("Pet {name} atualizado com sucesso!")
}

pub fn msg_pet_deleted(name: &str) -> String {
    format!("Pet {name} excluído com sucesso.")
}

pub fn msg_pet_without_records(name: &str) -> String {
    format!("{name} ainda não possui eventos nem metas cadastrados.")
}

/// Pet form values after validation
#[derive(Debug, PartialEq)]
struct ValidPet {
    name: String,
    species: String,
    breed: Option<String>,
    birthday: NaiveDate,
    weight: Decimal,
}

/// Weight accepts both `5.1` and `5,1`
fn parse_weight(value: &str) -> ApiResult<Decimal> {
    let weight = Decimal::from_str(&value.trim().replace(',', "."))
        .map_err(|_| ApiError::Validation(MSG_WEIGHT_INVALID.into()))?;

    if weight <= Decimal::ZERO {
        return Err(ApiError::Validation(MSG_WEIGHT_NOT_POSITIVE.into()));
    }

    Ok(weight)
}

fn validate_pet_form(form: &front::forms::pet::PetForm) -> ApiResult<ValidPet> {
    let name = clean_field(&form.name);
    let species = clean_field(&form.species);
    let breed = clean_field(&form.breed);

    if name.is_empty()
        || species.is_empty()
        || form.birthday.trim().is_empty()
        || form.weight.trim().is_empty()
    {
        return Err(ApiError::Validation(MSG_REQUIRED_FIELDS.into()));
    }

    let birthday = NaiveDate::parse_from_str(form.birthday.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| ApiError::Validation(MSG_BIRTHDAY_INVALID.into()))?;

    Ok(ValidPet {
        name,
        species,
        breed: (!breed.is_empty()).then_some(breed),
        birthday,
        weight: parse_weight(&form.weight)?,
    })
}

/// Pet data shown in the lists and the overview
#[derive(Debug, Serialize, PartialEq)]
pub struct PetListSchema {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub birthday: NaiveDate,
    pub weight: String,
    pub age_years: i32,
}

impl PetListSchema {
    fn from_pet(pet: models::pet::Pet, today: NaiveDate) -> Self {
        Self {
            age_years: pet.age_in_years(today),
            id: pet.id,
            name: pet.name,
            species: pet.species,
            breed: pet.breed.unwrap_or_default(),
            birthday: pet.birthday,
            weight: pet.weight.normalize().to_string(),
        }
    }
}

/// Retrieves all pets of a tutor.
pub async fn get_user_pets(
    user_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<Vec<PetListSchema>> {
    let today = Utc::now().date_naive();

    Ok(repo
        .get_all_pets_user_id(user_id)
        .await?
        .into_iter()
        .map(|pet| PetListSchema::from_pet(pet, today))
        .collect())
}

/// Retrieves one pet of the tutor.
///
/// # Errors
/// [`ApiError::NotFound`] if the pet doesn't exist or isn't owned by `user_id`
pub async fn get_user_pet(
    user_id: i64,
    pet_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::pet::Pet> {
    access::owned_pet(user_id, pet_id, repo).await
}

/// Validates the form and stores a new pet for the tutor.
///
/// Nothing is written when the form is invalid.
pub async fn create_pet(
    user_id: i64,
    form: &front::forms::pet::PetForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::pet::Pet> {
    let _span = logfire::span!("create_pet").entered();

    let valid = validate_pet_form(form)?;
    let now = Utc::now();
    let mut pet = models::pet::Pet {
        id: 0,
        user_app_id: user_id,
        name: valid.name,
        species: valid.species,
        breed: valid.breed,
        birthday: valid.birthday,
        weight: valid.weight,
        created_at: now,
        updated_at: now,
    };

    pet.id = repo.insert_pet(&pet).await?;

    metric::incr_pet_action_statds("create_pet");
    Ok(pet)
}

/// Validates the form and updates a pet of the tutor.
///
/// # Errors
/// * [`ApiError::NotFound`] for pets of other tutors, checked before the form
/// * [`ApiError::Validation`] for an invalid form, nothing is written
pub async fn update_pet(
    user_id: i64,
    pet_id: i64,
    form: &front::forms::pet::PetForm,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::pet::Pet> {
    let _span = logfire::span!("update_pet").entered();

    let pet = access::owned_pet(user_id, pet_id, repo).await?;
    let valid = validate_pet_form(form)?;

    let pet = models::pet::Pet {
        name: valid.name,
        species: valid.species,
        breed: valid.breed,
        birthday: valid.birthday,
        weight: valid.weight,
        updated_at: Utc::now(),
        ..pet
    };

    repo.update_pet(&pet).await?;

    metric::incr_pet_action_statds("update_pet");
    Ok(pet)
}

/// Deletes a pet of the tutor, its events, goals and shopping items go with it.
///
/// Returns the deleted pet.
pub async fn delete_pet(
    user_id: i64,
    pet_id: i64,
    repo: &repo::ImplAppRepo,
) -> ApiResult<models::pet::Pet> {
    let pet = access::owned_pet(user_id, pet_id, repo).await?;

    repo.delete_pet(pet.id, user_id).await?;

    metric::incr_pet_action_statds("delete_pet");
    Ok(pet)
}

/// Derived read of a pet shown in its overview page
#[derive(Debug, Serialize)]
pub struct PetOverviewSchema {
    pub pet: PetListSchema,
    pub total_events: usize,
    pub total_goals: usize,
    pub completed_goals: usize,
    /// Last events by date, newest first
    pub recent_events: Vec<event::EventSchema>,
    /// Goals still in progress, lowest progress and soonest due first
    pub pending_goals: Vec<goal::GoalSchema>,
}

impl PetOverviewSchema {
    /// A pet without events nor goals gets an informative notice
    pub fn has_no_records(&self) -> bool {
        self.total_events == 0 && self.total_goals == 0
    }
}

/// Builds the overview of a pet at the date `today`.
pub async fn get_pet_overview(
    user_id: i64,
    pet_id: i64,
    today: NaiveDate,
    repo: &repo::ImplAppRepo,
) -> ApiResult<PetOverviewSchema> {
    let pet = access::owned_pet(user_id, pet_id, repo).await?;

    let mut events = repo.get_pet_events(pet.id).await?;
    events.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let goals = repo.get_pet_goals(pet.id).await?;
    let total_goals = goals.len();
    let completed_goals = goals.iter().filter(|g| g.is_completed()).count();

    let mut pending_goals = goals
        .into_iter()
        .filter(|g| !g.is_completed())
        .collect::<Vec<_>>();
    pending_goals.sort_by(|a, b| {
        a.progress
            .cmp(&b.progress)
            .then(a.due_date.cmp(&b.due_date))
    });

    Ok(PetOverviewSchema {
        pet: PetListSchema::from_pet(pet, today),
        total_events: events.len(),
        total_goals,
        completed_goals,
        recent_events: events
            .into_iter()
            .take(consts::OVERVIEW_RECENT_EVENTS)
            .map(Into::into)
            .collect(),
        pending_goals: pending_goals.into_iter().map(Into::into).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;
    use rust_decimal_macros::dec;

    fn pet_form(name: &str, birthday: &str, weight: &str) -> front::forms::pet::PetForm {
        front::forms::pet::PetForm {
            name: name.into(),
            species: "Gato".into(),
            breed: "".into(),
            birthday: birthday.into(),
            weight: weight.into(),
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, DATE_INPUT_FORMAT).unwrap()
    }

    fn stored_pet(id: i64, user_app_id: i64) -> models::pet::Pet {
        models::pet::Pet {
            id,
            user_app_id,
            name: "Bolinha".into(),
            species: "Gato".into(),
            breed: Some("SRD".into()),
            birthday: date("2021-08-01"),
            weight: dec!(5.1),
            ..Default::default()
        }
    }

    fn event_on(id: i64, on: &str) -> models::event::Event {
        models::event::Event {
            id,
            pet_id: 1,
            user_app_id: 1,
            kind: models::event::EventKind::Vaccine,
            date: date(on),
            ..Default::default()
        }
    }

    fn goal_with(id: i64, progress: u8, due: &str) -> models::goal::Goal {
        models::goal::Goal {
            id,
            pet_id: 1,
            user_app_id: 1,
            description: format!("goal {id}"),
            due_date: date(due),
            progress,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("5.1").unwrap(), dec!(5.1));
        assert_eq!(parse_weight(" 5,1 ").unwrap(), dec!(5.1));
        assert!(matches!(parse_weight("0"), Err(ApiError::Validation(msg)) if msg == MSG_WEIGHT_NOT_POSITIVE));
        assert!(matches!(parse_weight("-2"), Err(ApiError::Validation(msg)) if msg == MSG_WEIGHT_NOT_POSITIVE));
        assert!(matches!(parse_weight("abc"), Err(ApiError::Validation(msg)) if msg == MSG_WEIGHT_INVALID));
    }

    #[test]
    fn test_validate_pet_form_optional_breed() {
        let mut form = pet_form("Bolinha", "2021-08-01", "5.1");
        let valid = validate_pet_form(&form).unwrap();
        assert_eq!(valid.breed, None);

        form.breed = "Siamês".into();
        let valid = validate_pet_form(&form).unwrap();
        assert_eq!(valid.breed.as_deref(), Some("Siamês"));
    }

    #[test]
    fn test_validate_pet_form_required_fields_and_date() {
        let missing_name = validate_pet_form(&pet_form("  ", "2021-08-01", "5.1"));
        let missing_weight = validate_pet_form(&pet_form("Bolinha", "2021-08-01", ""));
        let bad_date = validate_pet_form(&pet_form("Bolinha", "01/08/2021", "5.1"));

        assert!(matches!(missing_name, Err(ApiError::Validation(msg)) if msg == MSG_REQUIRED_FIELDS));
        assert!(matches!(missing_weight, Err(ApiError::Validation(msg)) if msg == MSG_REQUIRED_FIELDS));
        assert!(matches!(bad_date, Err(ApiError::Validation(msg)) if msg == MSG_BIRTHDAY_INVALID));
    }

    #[ntex::test]
    async fn test_create_pet_success() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_insert_pet()
            .withf(|pet| {
                pet.user_app_id == 3
                    && pet.name == "Bolinha"
                    && pet.species == "Gato"
                    && pet.birthday == date("2021-08-01")
                    && pet.weight == dec!(5.1)
            })
            .times(1)
            .returning(|_| Ok(10));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = create_pet(3, &pet_form("Bolinha", "2021-08-01", "5.1"), &mock_repo).await;

        let pet = result.unwrap();
        assert_eq!(pet.id, 10);
        let notice = msg_pet_created(&pet.name);
        assert!(notice.contains("adicionado") && notice.contains("Bolinha"));
    }

    #[ntex::test]
    async fn test_create_pet_stores_name_as_typed() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_insert_pet()
            .withf(|pet| pet.name == "Tom & Jerry")
            .times(1)
            .returning(|_| Ok(11));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let pet = create_pet(3, &pet_form(" Tom & Jerry ", "2021-08-01", "5,1"), &mock_repo)
            .await
            .unwrap();

        assert_eq!(
            msg_pet_created(&pet.name),
            "Pet Tom & Jerry adicionado com sucesso!"
        );
    }

    #[ntex::test]
    async fn test_create_pet_invalid_weight_writes_nothing() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_insert_pet().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        for weight in ["0", "-1.5", "pesado"] {
            let result =
                create_pet(3, &pet_form("Bolinha", "2021-08-01", weight), &mock_repo).await;

            assert!(matches!(result, Err(ApiError::Validation(_))));
        }
    }

    #[ntex::test]
    async fn test_update_pet_of_other_tutor_is_not_found() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(stored_pet(id, 1))));
        mock_repo.expect_update_pet().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = update_pet(2, 1, &pet_form("Rex", "2020-01-01", "10"), &mock_repo).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[ntex::test]
    async fn test_update_pet_invalid_form_writes_nothing() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .returning(|id| Ok(Some(stored_pet(id, 1))));
        mock_repo.expect_update_pet().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = update_pet(1, 1, &pet_form("Bolinha", "2021-08-01", "0"), &mock_repo).await;

        assert!(matches!(result, Err(ApiError::Validation(msg)) if msg == MSG_WEIGHT_NOT_POSITIVE));
    }

    #[ntex::test]
    async fn test_update_pet_keeps_identity() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .returning(|id| Ok(Some(stored_pet(id, 1))));
        mock_repo
            .expect_update_pet()
            .withf(|pet| pet.id == 5 && pet.user_app_id == 1 && pet.name == "Rex" && pet.breed.is_none())
            .times(1)
            .returning(|_| Ok(()));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = update_pet(1, 5, &pet_form("Rex", "2020-01-01", "10"), &mock_repo).await;

        assert!(result.is_ok_and(|pet| pet.weight == dec!(10)));
    }

    #[ntex::test]
    async fn test_delete_pet_returns_deleted_pet() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .returning(|id| Ok(Some(stored_pet(id, 1))));
        mock_repo
            .expect_delete_pet()
            .with(eq(4), eq(1))
            .times(1)
            .returning(|_, _| Ok(()));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = delete_pet(1, 4, &mock_repo).await;

        assert!(result.is_ok_and(|pet| msg_pet_deleted(&pet.name).contains("Bolinha")));
    }

    #[ntex::test]
    async fn test_get_user_pets_only_lists_requested_tutor() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_all_pets_user_id()
            .with(eq(1))
            .times(1)
            .returning(|user_id| Ok(vec![stored_pet(1, user_id)]));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let pets = get_user_pets(1, &mock_repo).await.unwrap();

        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].breed, "SRD");
        assert_eq!(pets[0].weight, "5.1");
    }

    #[ntex::test]
    async fn test_overview_statistics() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .returning(|id| Ok(Some(stored_pet(id, 1))));
        mock_repo.expect_get_pet_events().returning(|_| {
            Ok((1..=7)
                .map(|day| event_on(day, &format!("2025-01-0{day}")))
                .collect())
        });
        mock_repo.expect_get_pet_goals().returning(|_| {
            Ok(vec![
                goal_with(1, 100, "2025-01-01"),
                goal_with(2, 40, "2025-05-01"),
                goal_with(3, 10, "2025-09-01"),
                goal_with(4, 40, "2025-03-01"),
            ])
        });
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let overview = get_pet_overview(1, 1, date("2025-07-31"), &mock_repo)
            .await
            .unwrap();

        assert_eq!(overview.pet.age_years, 3);
        assert_eq!(overview.total_events, 7);
        assert_eq!(overview.completed_goals, 1);
        assert_eq!(
            overview.recent_events.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![7, 6, 5, 4, 3]
        );
        assert_eq!(
            overview.pending_goals.iter().map(|g| g.id).collect::<Vec<_>>(),
            vec![3, 4, 2]
        );
        assert!(!overview.has_no_records());
    }

    #[ntex::test]
    async fn test_overview_of_pet_without_records() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .returning(|id| Ok(Some(stored_pet(id, 1))));
        mock_repo.expect_get_pet_events().returning(|_| Ok(vec![]));
        mock_repo.expect_get_pet_goals().returning(|_| Ok(vec![]));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let overview = get_pet_overview(1, 1, date("2025-07-31"), &mock_repo)
            .await
            .unwrap();

        assert!(overview.has_no_records());
        assert!(overview.recent_events.is_empty() && overview.pending_goals.is_empty());
    }

    #[ntex::test]
    async fn test_overview_of_other_tutor_pet_is_not_found() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .returning(|id| Ok(Some(stored_pet(id, 1))));
        mock_repo.expect_get_pet_events().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = get_pet_overview(9, 1, date("2025-07-31"), &mock_repo).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }
}
