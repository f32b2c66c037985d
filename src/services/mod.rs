pub mod catalog;
pub use catalog::MovieCatalog;

pub mod trending_service;
pub mod trending_service_impl;
pub use trending_service::{
    RecordOutcome, TrendingError, TrendingOptions, TrendingService, TrendingStore,
};
pub use trending_service_impl::SeaOrmTrendingStore;

pub mod view;
pub use view::{FetchStatus, ViewState};

pub mod session;
pub use session::{RecordStats, SearchSession, SessionOptions, SessionSnapshot};
