//! Pipeline module - builds, fits, applies, and persists the preprocessing stage

pub mod artifact;
pub mod categorical;
pub mod columns;
pub mod impute;
pub mod loader;
pub mod numeric;
pub mod preprocessor;
pub mod scaler;
pub mod schema;
pub mod transformation;

pub use artifact::*;
pub use categorical::{CategoricalPipeline, FittedCategoricalColumn};
pub use loader::*;
pub use numeric::{FittedNumericColumn, NumericPipeline};
pub use preprocessor::*;
pub use scaler::{FittedScaler, StandardScaler};
pub use schema::*;
pub use transformation::*;
