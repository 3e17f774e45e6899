//! Reusable widget components.

pub mod detail;
pub mod filter;
pub mod modal;
pub mod status;

pub use detail::DetailPanel;
pub use filter::{FilterBar, FilterOption};
pub use modal::{centered_rect, ModalPanel};
pub use status::{StatusCount, StatusIndicator};
