pub mod engine;
pub mod pipeline;
pub mod pysep;
pub mod travel_time;
pub mod weights;

pub use crate::domain::model::{ConversionResult, TravelTimeRow, WeightRecord, WeightsTable};
pub use crate::domain::ports::{ConfigProvider, EventProcessor, Pipeline, Storage};
pub use crate::utils::error::Result;
