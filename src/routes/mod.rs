pub mod doubt;
pub mod health;
pub mod home;
pub mod quiz;
