pub mod icon;
pub mod prices;
pub mod quote;
pub mod setup;
pub mod swap;
pub mod ui;
