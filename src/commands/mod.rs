pub mod extract;
pub mod inventory;
pub mod listing;
pub mod status;
