pub mod center;
pub mod path;
pub mod polynomial;
