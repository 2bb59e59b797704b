// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod app;
pub mod backend;
pub mod color;
pub mod components;
pub mod config;
pub mod error;
pub mod git;
pub mod pick;
pub mod render;
pub mod repo;
pub mod state;
pub mod theme;
pub mod types;
