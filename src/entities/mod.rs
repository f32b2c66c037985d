pub mod prelude;

pub mod trending_searches;
