pub mod experience;
pub mod positioned;
pub mod year_month;

pub use experience::{Category, CategoryStyle, ExperienceId, ExperienceRecord};
pub use positioned::{AxisLabel, LayoutResult, PositionedExperience};
pub use year_month::{DateError, YearMonth};
