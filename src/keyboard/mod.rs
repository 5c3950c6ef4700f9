pub mod display;
pub mod finger;
pub mod guide;
pub mod layout;
pub mod layouts;
pub mod registry;
pub mod resolver;
