pub mod dashboard;
pub mod insight;
pub mod page;
pub mod units;
