pub mod collision;
pub mod event;
pub mod step;
pub mod traffic;
pub mod view;
pub mod world;
