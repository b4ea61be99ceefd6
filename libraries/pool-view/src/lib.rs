//! Soundpool List Views
//!
//! Grouping, pagination, and selection for the admin import list and the
//! listener track list.
//!
//! # Architecture
//!
//! - `group`: Calendar-day grouping in a fixed timezone
//! - `paginate`: Page-based slicing and infinite-scroll reveal
//! - `cursor`: Page cursor with the forward-only infinite rule
//! - `selection`: Page-independent multi-selection
//! - `status`: View state machine (idle, loading, stabilizing, stable)
//! - `settle`: Debounced commit that coalesces bursts of updates
//!
//! # Example
//!
//! ```ignore
//! use pool_core::TimeZoneConfig;
//! use pool_view::{DayGrouper, PageMode, paginate};
//!
//! let view = DayGrouper::now(TimeZoneConfig::brasilia()).group_by_day(items);
//! let first = paginate(&view, 0, 50, PageMode::Page)?;
//! for group in &first.view.groups {
//!     println!("{} ({} tracks)", group.label, group.items.len());
//! }
//! ```

mod error;

pub mod cursor;
pub mod group;
pub mod paginate;
pub mod selection;
pub mod settle;
pub mod status;

pub use cursor::PageCursor;
pub use error::ViewError;
pub use group::{DayGroup, DayGrouper, GroupedView};
pub use paginate::{paginate, Page, PageMode};
pub use selection::{Selection, VisibleToggle};
pub use settle::{CollectionStabilizer, Settler, DEFAULT_SETTLE_WINDOW};
pub use status::{ViewEvent, ViewStatus};

pub type Result<T> = std::result::Result<T, ViewError>;
