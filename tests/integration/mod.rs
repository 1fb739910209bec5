//! Integration tests for the profile-form library and CLI

mod cli_commands;
mod config_integration;
mod session_flow;
mod store_integration;
mod test_utils;
