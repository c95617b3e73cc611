pub mod catalog;
pub mod family;
pub mod points_history;
pub mod post;
pub mod scoring;
pub mod selection;
