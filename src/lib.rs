//! A small Rust client for the Taskora API.
//!
//! Four services share one contract: every request carries the API key as the
//! `apikey` query parameter, HTTP 200 bodies are returned as
//! [`serde_json::Value`] untouched, anything else becomes an [`Error`].
//!
//! Each service is available in two flavours over the same endpoint table:
//! [`AsyncClient`] (non-blocking, reqwest + any async runtime) and
//! [`BlockingClient`] (blocking the calling thread).
//!
//! ## Quick start
//! - Configure the key via `TASKORA_API_KEY` or a `.taskorarc` file (current
//!   directory or home directory), or pass it explicitly.
//! - Build a client for the service you need and call its endpoint methods.
//!
//! ```no_run
//! use taskora::{BlockingQuizClient, Result};
//!
//! fn main() -> Result<()> {
//!     let mut quiz = BlockingQuizClient::from_env()?;
//!     for question in quiz.get_python_quiz(3)? {
//!         println!("{question}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The session is opened on the first request and released when the client
//! is dropped; [`AsyncClient::close`] releases it early and the next call
//! reopens it.

#![forbid(unsafe_code)]

mod client;
mod config;
mod endpoint;
mod error;
mod service;
mod util;

pub mod captcha;
pub mod chatbot;
pub mod instagram;
pub mod quiz;
pub mod transport;

pub use client::{AsyncClient, BlockingClient};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, Method};
pub use error::{Error, ErrorBody, Result};
pub use quiz::{QUIZ_SIZE_RANGE, QuizCategory};
pub use service::{Captcha, Chatbot, Instagram, Quiz, Service};

pub type InstagramClient = AsyncClient<Instagram>;
pub type QuizClient = AsyncClient<Quiz>;
pub type ChatbotClient = AsyncClient<Chatbot>;
pub type CaptchaClient = AsyncClient<Captcha>;

pub type BlockingInstagramClient = BlockingClient<Instagram>;
pub type BlockingQuizClient = BlockingClient<Quiz>;
pub type BlockingChatbotClient = BlockingClient<Chatbot>;
pub type BlockingCaptchaClient = BlockingClient<Captcha>;
