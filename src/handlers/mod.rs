pub mod ai;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod expenses;
pub mod meetings;
pub mod notes;
pub mod proposals;
pub mod services;
pub mod settings;
pub mod tasks;
pub mod whatsapp;
