//! Fit every model on the train window and score it on each target window.

use tracing::{debug, info, warn};

use crate::core::SeriesView;
use crate::error::{ForecastError, Result};
use crate::evaluation::{rmse, ScoreRecord, ScoreTable};
use crate::models::{FittedModel, Forecaster, ModelRegistry};
use crate::split::{Splits, WindowLabel};

/// A model that could not be scored.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFailure {
    pub model: String,
    /// Window being scored when the failure occurred; `None` if fitting failed.
    pub window: Option<WindowLabel>,
    pub error: ForecastError,
}

/// Scores plus the models that could not be scored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub table: ScoreTable,
    pub failures: Vec<ModelFailure>,
}

impl Evaluation {
    /// True if every model scored on every target.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs a model roster over a set of splits.
pub struct Evaluator {
    registry: ModelRegistry,
}

impl Evaluator {
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Fit each model once on the train window and score its own forecast
    /// against each of `targets`, in order.
    ///
    /// A model that fails to fit or forecast contributes no rows; the error
    /// is recorded in [`Evaluation::failures`].
    pub fn evaluate(&self, splits: &Splits<'_>, targets: &[WindowLabel]) -> Evaluation {
        let mut evaluation = Evaluation::default();
        let train = splits.train();

        info!(
            models = self.registry.len(),
            train_days = train.len(),
            targets = targets.len(),
            "evaluating models"
        );

        for model in self.registry.iter() {
            let fitted = match model.fit(train) {
                Ok(fitted) => fitted,
                Err(error) => {
                    warn!(model = model.name(), %error, "fit failed");
                    evaluation.failures.push(ModelFailure {
                        model: model.name().to_string(),
                        window: None,
                        error,
                    });
                    continue;
                }
            };

            for &label in targets {
                match score(model, &fitted, splits.get(label), label) {
                    Ok(record) => evaluation.table.push(record),
                    Err(error) => {
                        warn!(model = model.name(), window = %label, %error, "scoring failed");
                        evaluation.failures.push(ModelFailure {
                            model: model.name().to_string(),
                            window: Some(label),
                            error,
                        });
                    }
                }
            }
        }

        evaluation
    }

    /// Fit `model` on `train` and score it against `target`, propagating
    /// any error.
    pub fn evaluate_one(
        model: &dyn Forecaster,
        train: SeriesView<'_>,
        target: SeriesView<'_>,
        label: WindowLabel,
    ) -> Result<ScoreRecord> {
        let fitted = model.fit(train)?;
        score(model, &fitted, target, label)
    }
}

fn score(
    model: &dyn Forecaster,
    fitted: &FittedModel,
    target: SeriesView<'_>,
    label: WindowLabel,
) -> Result<ScoreRecord> {
    let forecast = model.forecast_dates(fitted, target.dates())?;
    let error = rmse(target, &forecast)?;

    debug!(model = model.name(), window = %label, days = target.len(), rmse = error, "scored");

    Ok(ScoreRecord::new(model.name(), label, error))
}
