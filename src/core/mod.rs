pub mod etl;
pub mod extract;
pub mod harvester;
pub mod pipeline;
pub mod query;

pub use crate::domain::model::{PageResponse, Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, PageFetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
