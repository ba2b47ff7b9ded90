//! REST API controllers.

pub mod conversation_controller;
pub mod health_controller;
pub mod invalidation_controller;
pub mod room_controller;
pub mod search_controller;
pub mod social_controller;
pub mod user_controller;
