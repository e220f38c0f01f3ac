pub mod health_route;
pub mod past_life;
pub mod reveal;
pub mod story;
