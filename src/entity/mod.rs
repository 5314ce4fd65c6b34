pub mod categories;
pub mod items;
pub mod order_items;
pub mod orders;
pub mod tables;
pub mod tenants;

pub use categories::Entity as Categories;
pub use items::Entity as Items;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use tables::Entity as Tables;
pub use tenants::Entity as Tenants;
