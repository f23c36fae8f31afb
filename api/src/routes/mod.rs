pub mod answer;
pub mod root_route;
