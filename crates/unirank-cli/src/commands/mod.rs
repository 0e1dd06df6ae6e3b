pub mod inspect;
pub mod parse;
pub mod rank_types;
pub mod scrape;
