//! Request handlers, one module per resource.
//!
//! Handlers stay thin: they extract the caller and inputs, delegate rules to
//! `osmtm_core` and storage to the `osmtm_db` repositories, and map errors
//! via [`crate::error::AppError`].

pub mod auth;
pub mod home;
pub mod jobs;
pub mod nextview;
pub mod tiles;
pub mod users;
