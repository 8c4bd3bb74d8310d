pub mod contact;
pub mod entity;
pub mod grid;
pub mod motion;
pub mod rules;
pub mod tile;
