//! Pages
//!
//! One component per route.

mod board;
mod home;
mod projects;

pub use board::BoardPage;
pub use home::{HomePage, LoginPage, NotFoundPage};
pub use projects::ProjectsPage;
