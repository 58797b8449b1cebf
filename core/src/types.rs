//! Domain DTOs for the fish registry.
//!
//! # Design
//! `Fish` is the only entity. `CreateFish` is a `Fish` without its `id`
//! (the storage layer assigns ids) and `UpdateFish` is a partial
//! `CreateFish` merged field by field into an existing record. Field names
//! are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A single fish record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fish {
    pub id: String,
    pub name: String,
    pub species: String,
    pub length_in_cm: f64,
    pub weight_in_kg: f64,
}

impl Fish {
    /// Attach a storage-assigned id to a create payload.
    pub fn from_input(id: impl Into<String>, input: CreateFish) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            species: input.species,
            length_in_cm: input.length_in_cm,
            weight_in_kg: input.weight_in_kg,
        }
    }
}

/// Request payload for creating a new fish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateFish {
    pub name: String,
    pub species: String,
    pub length_in_cm: f64,
    pub weight_in_kg: f64,
}

impl CreateFish {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("name", &self.name)?;
        require_text("species", &self.species)?;
        require_measurement("lengthInCm", self.length_in_cm)?;
        require_measurement("weightInKg", self.weight_in_kg)
    }
}

/// Request payload for updating an existing fish. Only the fields present in
/// the JSON are applied; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFish {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_in_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_in_kg: Option<f64>,
}

impl UpdateFish {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(species) = &self.species {
            require_text("species", species)?;
        }
        if let Some(length) = self.length_in_cm {
            require_measurement("lengthInCm", length)?;
        }
        if let Some(weight) = self.weight_in_kg {
            require_measurement("weightInKg", weight)?;
        }
        Ok(())
    }

    /// Merge the present fields into `fish`. The id is never touched.
    pub fn apply_to(self, fish: &mut Fish) {
        if let Some(name) = self.name {
            fish.name = name;
        }
        if let Some(species) = self.species {
            fish.species = species;
        }
        if let Some(length) = self.length_in_cm {
            fish.length_in_cm = length;
        }
        if let Some(weight) = self.weight_in_kg {
            fish.weight_in_kg = weight;
        }
    }
}

impl From<CreateFish> for UpdateFish {
    fn from(input: CreateFish) -> Self {
        Self {
            name: Some(input.name),
            species: Some(input.species),
            length_in_cm: Some(input.length_in_cm),
            weight_in_kg: Some(input.weight_in_kg),
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_measurement(field: &str, value: f64) -> Result<(), ApiError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::ValidationError(format!(
            "{field} must be a finite, non-negative number, got {value}"
        )));
    }
    Ok(())
}
