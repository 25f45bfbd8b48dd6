pub mod calendar;
pub mod categories;
pub mod config;
pub mod contact;
pub mod event;
pub mod events;
pub mod home;
