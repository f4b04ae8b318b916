pub mod clean;
pub mod fuzzy;
pub mod mapping;
pub mod mask;
pub mod roles;
pub mod template;
