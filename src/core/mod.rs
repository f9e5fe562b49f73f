//! Core conversion logic and abstractions

pub mod chart;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod log;
pub mod rates;
pub mod state;

// Re-export main types for cleaner imports
pub use chart::ChartSeries;
pub use conversion::{Conversion, Unavailable, convert, convert_amount};
pub use currency::Currency;
pub use rates::{RateProvider, RateTable};
pub use state::{ConverterState, RateStatus, refresh_rates};
