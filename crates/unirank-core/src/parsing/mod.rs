pub mod coerce;
pub mod record;
pub mod schema;
pub mod values;

pub use coerce::coerce;
pub use record::build;
pub use schema::resolve;
