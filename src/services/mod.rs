pub mod favorite_service;
pub mod property_service;
pub mod user_service;

pub use favorite_service::{FavoriteService, ToggleOutcome};
pub use property_service::PropertyService;
pub use user_service::UserService;
