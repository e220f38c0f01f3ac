pub mod past_life_request;
pub mod past_life_route;
