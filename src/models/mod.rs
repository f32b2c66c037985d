pub mod movie;
pub mod trending;

pub use movie::MovieRecord;
pub use trending::TrendingEntry;
