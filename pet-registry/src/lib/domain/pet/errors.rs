use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeciesError {
    #[error("Unknown species '{0}' (expected one of DOG, CAT, BIRD, RODENT)")]
    Unknown(String),
}

/// Error for free-text pet attributes (name, breed)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PetTextError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BirthDateError {
    #[error("Invalid date format '{0}', expected yyyy-MM-dd")]
    InvalidFormat(String),

    #[error("Birthdate {0} is in the future")]
    InFuture(NaiveDate),
}

/// Top-level error for all pet-related operations
#[derive(Debug, Clone, Error)]
pub enum PetError {
    #[error("Invalid species: {0}")]
    InvalidSpecies(#[from] SpeciesError),

    #[error("Invalid pet attribute: {0}")]
    InvalidText(#[from] PetTextError),

    #[error("Invalid birthdate: {0}")]
    InvalidBirthDate(#[from] BirthDateError),

    #[error("Pet not found: {0}")]
    NotFound(String),

    #[error("No pets found")]
    NoneFound,

    #[error("Not allowed to modify pet {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
