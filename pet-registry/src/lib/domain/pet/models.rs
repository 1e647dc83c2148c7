use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::pet::errors::BirthDateError;
use crate::domain::pet::errors::PetTextError;
use crate::domain::pet::errors::SpeciesError;
use crate::domain::user::models::UserId;

/// Pet aggregate entity. Every pet has exactly one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    pub species: Species,
    pub breed: Breed,
    pub name: PetName,
    pub birth_date: BirthDate,
    pub owner_id: UserId,
}

impl Pet {
    /// Overwrite every client-editable attribute.
    pub fn apply(&mut self, details: PetDetails) {
        self.species = details.species;
        self.breed = details.breed;
        self.name = details.name;
        self.birth_date = details.birth_date;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PetId(pub i64);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rodent,
}

impl Species {
    pub fn as_str(self) -> &'static str {
        match self {
            Species::Dog => "DOG",
            Species::Cat => "CAT",
            Species::Bird => "BIRD",
            Species::Rodent => "RODENT",
        }
    }
}

impl FromStr for Species {
    type Err = SpeciesError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DOG" => Ok(Species::Dog),
            "CAT" => Ok(Species::Cat),
            "BIRD" => Ok(Species::Bird),
            "RODENT" => Ok(Species::Rodent),
            _ => Err(SpeciesError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MAX_TEXT_LENGTH: usize = 50;

fn bounded_text(field: &'static str, value: String) -> Result<String, PetTextError> {
    let length = value.chars().count();
    if value.trim().is_empty() {
        Err(PetTextError::Empty { field })
    } else if length > MAX_TEXT_LENGTH {
        Err(PetTextError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
            actual: length,
        })
    } else {
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetName(String);

impl PetName {
    pub fn new(name: String) -> Result<Self, PetTextError> {
        bounded_text("Name", name).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breed(String);

impl Breed {
    pub fn new(breed: String) -> Result<Self, PetTextError> {
        bounded_text("Breed", breed).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Birth date that is never later than the day it was validated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// # Errors
    /// * `InFuture` - `date` is after `today`
    pub fn new(date: NaiveDate, today: NaiveDate) -> Result<Self, BirthDateError> {
        if date > today {
            return Err(BirthDateError::InFuture(date));
        }
        Ok(Self(date))
    }

    /// Parse an ISO `yyyy-MM-dd` date.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a `yyyy-MM-dd` date
    /// * `InFuture` - Date is after `today`
    pub fn parse(value: &str, today: NaiveDate) -> Result<Self, BirthDateError> {
        let date = NaiveDate::parse_from_str(value.trim(), Self::FORMAT)
            .map_err(|_| BirthDateError::InvalidFormat(value.to_string()))?;
        Self::new(date, today)
    }

    /// Rehydrate a stored date without re-checking it against the clock.
    pub fn from_stored(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Client-editable pet attributes, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDetails {
    pub species: Species,
    pub breed: Breed,
    pub name: PetName,
    pub birth_date: BirthDate,
}

/// A pet ready to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub details: PetDetails,
    pub owner_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_species_parse() {
        assert_eq!("DOG".parse::<Species>(), Ok(Species::Dog));
        assert_eq!("cat".parse::<Species>(), Ok(Species::Cat));
        assert_eq!(" Rodent ".parse::<Species>(), Ok(Species::Rodent));
        assert_eq!(
            "FISH".parse::<Species>(),
            Err(SpeciesError::Unknown("FISH".to_string()))
        );
        assert_eq!(Species::Bird.to_string(), "BIRD");
    }

    #[test]
    fn test_birth_date_parse() {
        let today = day(2024, 6, 1);

        let parsed = BirthDate::parse("2020-01-01", today).unwrap();
        assert_eq!(parsed.date(), day(2020, 1, 1));
        assert_eq!(parsed.to_string(), "2020-01-01");
    }

    #[test]
    fn test_birth_date_today_is_allowed() {
        let today = day(2024, 6, 1);
        assert!(BirthDate::parse("2024-06-01", today).is_ok());
    }

    #[test]
    fn test_birth_date_in_future_rejected() {
        let today = day(2024, 6, 1);
        assert_eq!(
            BirthDate::parse("2024-06-02", today),
            Err(BirthDateError::InFuture(day(2024, 6, 2)))
        );
    }

    #[test]
    fn test_birth_date_bad_format_rejected() {
        let today = day(2024, 6, 1);
        for input in ["01/01/2020", "2020-13-01", "yesterday", ""] {
            assert!(matches!(
                BirthDate::parse(input, today),
                Err(BirthDateError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_text_fields() {
        assert!(PetName::new("Rex".to_string()).is_ok());
        assert_eq!(
            PetName::new("  ".to_string()),
            Err(PetTextError::Empty { field: "Name" })
        );
        assert_eq!(
            Breed::new("b".repeat(51)),
            Err(PetTextError::TooLong {
                field: "Breed",
                max: 50,
                actual: 51
            })
        );
    }

    #[test]
    fn test_apply_keeps_identity_and_owner() {
        let today = day(2024, 6, 1);
        let mut pet = Pet {
            id: PetId(3),
            species: Species::Dog,
            breed: Breed::new("Lab".to_string()).unwrap(),
            name: PetName::new("Rex".to_string()).unwrap(),
            birth_date: BirthDate::parse("2020-01-01", today).unwrap(),
            owner_id: UserId(9),
        };

        pet.apply(PetDetails {
            species: Species::Cat,
            breed: Breed::new("Siamese".to_string()).unwrap(),
            name: PetName::new("Tom".to_string()).unwrap(),
            birth_date: BirthDate::parse("2021-02-03", today).unwrap(),
        });

        assert_eq!(pet.id, PetId(3));
        assert_eq!(pet.owner_id, UserId(9));
        assert_eq!(pet.species, Species::Cat);
        assert_eq!(pet.name.as_str(), "Tom");
        assert_eq!(pet.birth_date.to_string(), "2021-02-03");
    }
}
