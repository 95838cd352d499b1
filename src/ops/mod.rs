pub mod aggregate;
pub mod counts;
pub mod group;
pub mod join;
pub mod matching;
