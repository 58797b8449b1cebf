//! Client core for the fish registry.
//!
//! # Overview
//! A `Fish` CRUD contract (`FishApiClient`) with two interchangeable
//! backends, plus the headless presentation layer that drives it: a form, a
//! table with add/edit/delete dialog flows, and a page controller that owns
//! the session's collection.
//!
//! # Design
//! - `InMemoryFishApi` serves everything from process memory; `HttpFishApi`
//!   sends everything to the REST endpoint. No backend mixes the two.
//! - `FishClient` is stateless and sans-IO: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - Presentation types hold no rendering toolkit state; a UI drives them
//!   and reads their state back.

pub mod api;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod memory;
pub mod page;
pub mod remote;
pub mod table;
pub mod types;

pub use api::FishApiClient;
pub use client::{FishClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use form::{FishForm, FormError, FormField};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use memory::InMemoryFishApi;
pub use page::FishPage;
pub use remote::HttpFishApi;
pub use table::{render, FishMutations, FishTable, Flow, FlowState, TableError};
pub use types::{CreateFish, Fish, UpdateFish};
