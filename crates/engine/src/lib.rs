//! Rewards Admin Engine - views, forms and stores on top of the API client

pub mod calendar;
pub mod forms;
pub mod listing;
pub mod rewards;
pub mod store;

pub use calendar::{build_grid, CalendarGrid, CalendarView};
pub use forms::RecordForm;
pub use listing::{paginate, ChallengeFilter, Page, Searchable};
pub use rewards::{RewardEditor, RewardRules};
pub use store::{DeleteConfirmation, StreakStore, Store};
