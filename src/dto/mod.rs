pub mod favorites;
pub mod properties;
pub mod users;
