#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub(crate) mod api;
pub mod app;
pub mod article;
pub mod batch;
pub mod config;
pub mod explain;
pub mod observability;
pub mod pipeline;
pub mod ranking;
pub mod scoring;
pub mod signals;
pub mod util;
