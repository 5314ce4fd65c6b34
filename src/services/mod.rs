pub mod admin_order_service;
pub mod guest_order_service;
pub mod item_service;
pub mod menu_service;
pub mod order_service;
pub mod table_service;
