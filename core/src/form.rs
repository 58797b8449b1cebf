//! Headless add/edit form for one fish record.
//!
//! The form keeps the raw text of each input, the way an input widget does,
//! and turns it into a `CreateFish` on submit. It only checks that required
//! fields are present and that numeric fields parse; ranges are the API's
//! concern.

use crate::types::{CreateFish, Fish};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Species,
    LengthInCm,
    WeightInKg,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Species => "Species",
            FormField::LengthInCm => "Length (cm)",
            FormField::WeightInKg => "Weight (kg)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    MissingField(FormField),

    #[error("{} must be a number, got {value:?}", .field.label())]
    InvalidNumber { field: FormField, value: String },

    #[error("a submission is already in progress")]
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FishForm {
    name: String,
    species: String,
    length_in_cm: String,
    weight_in_kg: String,
    editing: bool,
}

impl FishForm {
    /// Blank form for a new record.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            species: String::new(),
            length_in_cm: "0".to_string(),
            weight_in_kg: "0".to_string(),
            editing: false,
        }
    }

    /// Form pre-filled from an existing record.
    pub fn edit(fish: &Fish) -> Self {
        Self {
            name: fish.name.clone(),
            species: fish.species.clone(),
            length_in_cm: fish.length_in_cm.to_string(),
            weight_in_kg: fish.weight_in_kg.to_string(),
            editing: true,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Species => &self.species,
            FormField::LengthInCm => &self.length_in_cm,
            FormField::WeightInKg => &self.weight_in_kg,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Species => self.species = value,
            FormField::LengthInCm => self.length_in_cm = value,
            FormField::WeightInKg => self.weight_in_kg = value,
        }
    }

    /// Build the complete input. Refused while the parent is submitting.
    pub fn submit(&self, submitting: bool) -> Result<CreateFish, FormError> {
        if submitting {
            return Err(FormError::Submitting);
        }
        Ok(CreateFish {
            name: required(FormField::Name, &self.name)?.to_string(),
            species: required(FormField::Species, &self.species)?.to_string(),
            length_in_cm: number(FormField::LengthInCm, &self.length_in_cm)?,
            weight_in_kg: number(FormField::WeightInKg, &self.weight_in_kg)?,
        })
    }

    pub fn submit_label(&self, submitting: bool) -> &'static str {
        match (submitting, self.editing) {
            (true, _) => "Saving...",
            (false, true) => "Update",
            (false, false) => "Create",
        }
    }
}

impl Default for FishForm {
    fn default() -> Self {
        Self::new()
    }
}

fn required(field: FormField, value: &str) -> Result<&str, FormError> {
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value)
}

fn number(field: FormField, value: &str) -> Result<f64, FormError> {
    let trimmed = required(field, value.trim())?;
    trimmed.parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
