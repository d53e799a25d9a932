pub mod modals;
pub mod panels;
