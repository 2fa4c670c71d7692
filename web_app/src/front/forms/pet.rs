use crate::models;
use serde::{Deserialize, Serialize};

/// Pet form as submitted, kept as text so an invalid form can be shown
/// again with the values the tutor typed.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct PetForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub weight: String,
}

impl From<&models::pet::Pet> for PetForm {
    fn from(pet: &models::pet::Pet) -> Self {
        PetForm {
            name: pet.name.to_string(),
            species: pet.species.to_string(),
            breed: pet.breed.clone().unwrap_or_default(),
            birthday: pet.birthday.format(crate::api::DATE_INPUT_FORMAT).to_string(),
            weight: pet.weight.normalize().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_form_from_pet_fills_inputs() {
        let pet = models::pet::Pet {
            name: "Bolinha".into(),
            species: "Gato".into(),
            breed: None,
            birthday: NaiveDate::from_ymd_opt(2021, 8, 1).unwrap(),
            weight: dec!(5.10),
            ..Default::default()
        };

        let form = PetForm::from(&pet);

        assert_eq!(form.birthday, "2021-08-01");
        assert_eq!(form.weight, "5.1");
        assert!(form.breed.is_empty());
    }
}
