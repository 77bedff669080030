pub mod form;
pub mod results;
