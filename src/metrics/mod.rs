pub mod definitions;
pub mod registry;
