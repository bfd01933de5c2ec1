pub mod health;
pub mod index;
pub mod login;
pub mod submit;
pub mod upload;
