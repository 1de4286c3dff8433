//! Hand-written test doubles shared across integration tests.

#![allow(dead_code)]

pub mod mock_launcher;
pub mod mock_repositories;
pub mod scripted_channel;

pub use mock_launcher::FakeLauncher;
pub use mock_repositories::{MockContactRepository, MockUserRepository};
pub use scripted_channel::ScriptedChannel;
