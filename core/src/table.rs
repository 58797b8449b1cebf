//! Table view and add/edit/delete dialog orchestration.
//!
//! # Design
//! Each mutation flow is a `Flow`: *Idle* → *DialogOpen* → *Submitting* and
//! back to *Idle* on success, or to *DialogOpen* with the error kept for
//! display on failure. The three flows are independent, each with its own
//! submitting flag, so an add and a delete may be in flight together.
//!
//! The table never owns the collection. Submissions go through
//! `FishMutations`, implemented by the page controller.
//!
//! Every submission is split into `begin_*` (validate, mark submitting, hand
//! back the payload) and `finish_*` (record the outcome). `submit_add`,
//! `submit_edit` and `confirm_delete` run both halves around the mutation
//! call.

use std::fmt::Write as _;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::form::{FishForm, FormError};
use crate::types::{CreateFish, Fish, UpdateFish};

pub const TABLE_TITLE: &str = "Fish Registry";
pub const TABLE_SUBTITLE: &str = "Manage your fish collection";
pub const EMPTY_MESSAGE: &str = "No fish in registry. Add your first fish to get started.";
pub const ADD_TITLE: &str = "Add New Fish";
pub const ADD_DESCRIPTION: &str = "Enter the details of the fish you want to add to the registry.";
pub const EDIT_TITLE: &str = "Edit Fish";
pub const DELETE_TITLE: &str = "Are you sure?";

const COLUMNS: [&str; 4] = ["Name", "Species", "Length (cm)", "Weight (kg)"];

/// Mutation callbacks the table invokes on its owner.
#[async_trait]
pub trait FishMutations: Send {
    async fn add_fish(&mut self, input: CreateFish) -> Result<Fish, ApiError>;

    async fn update_fish(&mut self, id: &str, input: UpdateFish) -> Result<Fish, ApiError>;

    async fn delete_fish(&mut self, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("no dialog is open")]
    NoDialog,

    #[error("a dialog is already open")]
    DialogOpen,

    #[error("a submission is in progress")]
    Busy,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    DialogOpen,
    Submitting,
}

/// One dialog-driven mutation flow over a captured target.
#[derive(Debug, Clone)]
pub struct Flow<T> {
    target: Option<T>,
    submitting: bool,
    error: Option<String>,
}

impl<T> Flow<T> {
    fn idle() -> Self {
        Self {
            target: None,
            submitting: false,
            error: None,
        }
    }

    pub fn state(&self) -> FlowState {
        match (&self.target, self.submitting) {
            (None, _) => FlowState::Idle,
            (Some(_), false) => FlowState::DialogOpen,
            (Some(_), true) => FlowState::Submitting,
        }
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message of the last failed submission, cleared on reopen or success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn open(&mut self, target: T) -> Result<(), TableError> {
        if self.target.is_some() {
            return Err(TableError::DialogOpen);
        }
        self.target = Some(target);
        self.error = None;
        Ok(())
    }

    fn close(&mut self) -> Result<(), TableError> {
        if self.submitting {
            return Err(TableError::Busy);
        }
        self.target = None;
        self.error = None;
        Ok(())
    }

    fn target_mut(&mut self) -> Option<&mut T> {
        if self.submitting {
            return None;
        }
        self.target.as_mut()
    }

    /// Check the flow can submit and hand out the target.
    fn ready(&self) -> Result<&T, TableError> {
        match self.state() {
            FlowState::Idle => Err(TableError::NoDialog),
            FlowState::Submitting => Err(TableError::Busy),
            FlowState::DialogOpen => self.target.as_ref().ok_or(TableError::NoDialog),
        }
    }

    fn fail(&mut self, error: &impl ToString) {
        self.submitting = false;
        self.error = Some(error.to_string());
    }

    fn finish<R>(&mut self, result: Result<R, ApiError>) -> Result<R, TableError> {
        if !self.submitting {
            return Err(TableError::NoDialog);
        }
        match result {
            Ok(value) => {
                *self = Self::idle();
                Ok(value)
            }
            Err(e) => {
                self.fail(&e);
                Err(e.into())
            }
        }
    }
}

/// Record plus the pre-filled form of an open edit dialog.
#[derive(Debug, Clone)]
pub struct EditTarget {
    pub fish: Fish,
    pub form: FishForm,
}

#[derive(Debug, Clone)]
pub struct FishTable {
    add: Flow<FishForm>,
    edit: Flow<EditTarget>,
    delete: Flow<Fish>,
}

impl FishTable {
    pub fn new() -> Self {
        Self {
            add: Flow::idle(),
            edit: Flow::idle(),
            delete: Flow::idle(),
        }
    }

    pub fn add_flow(&self) -> &Flow<FishForm> {
        &self.add
    }

    pub fn edit_flow(&self) -> &Flow<EditTarget> {
        &self.edit
    }

    pub fn delete_flow(&self) -> &Flow<Fish> {
        &self.delete
    }

    // --- add ---

    pub fn open_add(&mut self) -> Result<(), TableError> {
        self.add.open(FishForm::new())
    }

    pub fn close_add(&mut self) -> Result<(), TableError> {
        self.add.close()
    }

    /// The add form, while its dialog is open and not submitting.
    pub fn add_form_mut(&mut self) -> Option<&mut FishForm> {
        self.add.target_mut()
    }

    pub fn begin_add(&mut self) -> Result<CreateFish, TableError> {
        let input = self.add.ready()?.submit(false);
        let input = input.inspect_err(|e| self.add.fail(e))?;
        self.add.submitting = true;
        Ok(input)
    }

    pub fn finish_add(&mut self, result: Result<Fish, ApiError>) -> Result<Fish, TableError> {
        self.add.finish(result)
    }

    pub async fn submit_add<M: FishMutations + ?Sized>(
        &mut self,
        mutations: &mut M,
    ) -> Result<Fish, TableError> {
        let input = self.begin_add()?;
        let result = mutations.add_fish(input).await;
        self.finish_add(result)
    }

    // --- edit ---

    pub fn open_edit(&mut self, fish: &Fish) -> Result<(), TableError> {
        self.edit.open(EditTarget {
            fish: fish.clone(),
            form: FishForm::edit(fish),
        })
    }

    pub fn close_edit(&mut self) -> Result<(), TableError> {
        self.edit.close()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut FishForm> {
        self.edit.target_mut().map(|target| &mut target.form)
    }

    pub fn edit_description(&self) -> Option<String> {
        let target = self.edit.target()?;
        Some(format!("Update the details of {}.", target.fish.name))
    }

    /// Returns the record id and the complete update payload.
    pub fn begin_edit(&mut self) -> Result<(String, UpdateFish), TableError> {
        let target = self.edit.ready()?;
        let id = target.fish.id.clone();
        let input = target.form.submit(false);
        let input = input.inspect_err(|e| self.edit.fail(e))?;
        self.edit.submitting = true;
        Ok((id, input.into()))
    }

    pub fn finish_edit(&mut self, result: Result<Fish, ApiError>) -> Result<Fish, TableError> {
        self.edit.finish(result)
    }

    pub async fn submit_edit<M: FishMutations + ?Sized>(
        &mut self,
        mutations: &mut M,
    ) -> Result<Fish, TableError> {
        let (id, input) = self.begin_edit()?;
        let result = mutations.update_fish(&id, input).await;
        self.finish_edit(result)
    }

    // --- delete ---

    pub fn open_delete(&mut self, fish: &Fish) -> Result<(), TableError> {
        self.delete.open(fish.clone())
    }

    pub fn close_delete(&mut self) -> Result<(), TableError> {
        self.delete.close()
    }

    pub fn delete_description(&self) -> Option<String> {
        let fish = self.delete.target()?;
        Some(format!(
            "This will permanently delete {} from the registry. This action cannot be undone.",
            fish.name
        ))
    }

    pub fn delete_label(&self) -> &'static str {
        if self.delete.is_submitting() {
            "Deleting..."
        } else {
            "Delete"
        }
    }

    pub fn begin_delete(&mut self) -> Result<String, TableError> {
        let id = self.delete.ready()?.id.clone();
        self.delete.submitting = true;
        Ok(id)
    }

    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> Result<(), TableError> {
        self.delete.finish(result)
    }

    pub async fn confirm_delete<M: FishMutations + ?Sized>(
        &mut self,
        mutations: &mut M,
    ) -> Result<(), TableError> {
        let id = self.begin_delete()?;
        let result = mutations.delete_fish(&id).await;
        self.finish_delete(result)
    }
}

impl Default for FishTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the collection as a plain-text table.
pub fn render(fish: &[Fish]) -> String {
    let rows: Vec<[String; 4]> = fish
        .iter()
        .map(|f| {
            [
                f.name.clone(),
                f.species.clone(),
                f.length_in_cm.to_string(),
                f.weight_in_kg.to_string(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!("{TABLE_TITLE}\n{TABLE_SUBTITLE}\n\n");
    let header = [
        format!("{:<w$}", COLUMNS[0], w = widths[0]),
        format!("{:<w$}", COLUMNS[1], w = widths[1]),
        format!("{:>w$}", COLUMNS[2], w = widths[2]),
        format!("{:>w$}", COLUMNS[3], w = widths[3]),
    ];
    let _ = writeln!(out, "{}", header.join(" | "));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    if rows.is_empty() {
        let _ = writeln!(out, "{EMPTY_MESSAGE}");
        return out;
    }
    for row in &rows {
        let _ = writeln!(
            out,
            "{:<w0$} | {:<w1$} | {:>w2$} | {:>w3$}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
    }
    out
}
