//! Scoring forecasts against held-out windows.
//!
//! [`Evaluator`] fits each model of a [`ModelRegistry`](crate::models::ModelRegistry)
//! on the train window and records one [`ScoreRecord`] per target window.

mod evaluator;
pub mod report;
mod scoring;

pub use evaluator::{Evaluation, Evaluator, ModelFailure};
pub use scoring::{rmse, ScoreRecord, ScoreTable};
