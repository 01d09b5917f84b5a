pub mod favorites;
pub mod properties;
pub mod users;

pub use favorites::Entity as Favorites;
pub use properties::Entity as Properties;
pub use users::Entity as Users;
