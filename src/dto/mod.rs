pub mod items;
pub mod menu;
pub mod orders;
pub mod tables;
