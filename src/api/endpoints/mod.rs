pub mod draft;
pub mod health;
pub mod home;
pub mod intake;
pub mod medications;
pub mod reports;
pub mod view;
