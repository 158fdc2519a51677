pub mod address_map;
pub mod default;
