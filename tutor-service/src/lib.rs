//! tutor-service: a chat tutor restricted to the CAP Python course notes.
//!
//! One process holds one conversation. Student messages arrive over HTTP,
//! are folded into a curriculum-grounded prompt and answered by Gemini.
pub mod config;
pub mod curriculum;
pub mod handlers;
pub mod models;
pub mod render;
pub mod services;
pub mod startup;
