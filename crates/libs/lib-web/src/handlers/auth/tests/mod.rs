//! # Auth Handler Tests
//!
//! Test suite for registration and login.

mod login;
mod register;

use crate::handlers::test_support::TestApp;
use axum::http::StatusCode;
use serde_json::json;
