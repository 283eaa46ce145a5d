//! Rotina — client core for the Rotinas Saudáveis habit app.
//!
//! Account flows, the onboarding quiz wizard, the avatar customizer, and the
//! route guards. All persistence and authentication is delegated to an
//! external service, consumed through the traits in [`auth`] and [`profile`];
//! the concrete clients live in [`backend`].

pub mod auth;
pub mod avatar;
pub mod backend;
pub mod config;
pub mod error;
pub mod profile;
pub mod quiz;
pub mod screens;
