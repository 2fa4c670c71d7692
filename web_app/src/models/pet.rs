use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Pet {
    pub id: i64,
    pub user_app_id: i64,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birthday: NaiveDate,
    pub weight: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Full years lived at `today`, the current year only counts once the
    /// birthday has passed.
    pub fn age_in_years(&self, today: NaiveDate) -> i32 {
        let mut years = today.year() - self.birthday.year();

        if (today.month(), today.day()) < (self.birthday.month(), self.birthday.day()) {
            years -= 1;
        }

        years.max(0)
    }
}

impl super::Owned for Pet {
    fn owner_id(&self) -> i64 {
        self.user_app_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet_born_at(birthday: &str) -> Pet {
        Pet {
            birthday: NaiveDate::parse_from_str(birthday, "%Y-%m-%d").unwrap(),
            ..Pet::default()
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_age_before_birthday_this_year() {
        let pet = pet_born_at("2021-08-01");

        assert_eq!(pet.age_in_years(date("2025-07-31")), 3);
    }

    #[test]
    fn test_age_on_birthday() {
        let pet = pet_born_at("2021-08-01");

        assert_eq!(pet.age_in_years(date("2025-08-01")), 4);
    }

    #[test]
    fn test_age_of_newborn_and_future_birthdays() {
        assert_eq!(pet_born_at("2025-03-10").age_in_years(date("2025-03-10")), 0);
        assert_eq!(pet_born_at("2026-01-01").age_in_years(date("2025-03-10")), 0);
    }

    #[test]
    fn test_age_leap_day_birthday() {
        let pet = pet_born_at("2020-02-29");

        assert_eq!(pet.age_in_years(date("2021-02-28")), 0);
        assert_eq!(pet.age_in_years(date("2021-03-01")), 1);
    }
}
