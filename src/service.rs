//! Service markers selecting the endpoint set and default base URL of a client.

/// A remote service exposed by the Taskora API.
pub trait Service {
    /// Human readable name, used in logs.
    const NAME: &'static str;
    /// Key of the base URL override in the rc file; the environment variable is
    /// `TASKORA_` followed by the upper-cased key.
    const URL_KEY: &'static str;
    /// Base URL used when no override is configured.
    const DEFAULT_BASE_URL: Option<&'static str>;
}

macro_rules! taskora_host {
    () => {
        "https://taskora.onrender.com"
    };
}

pub(crate) const TASKORA_HOST: &str = taskora_host!();
const TASKORA_API_V1: &str = concat!(taskora_host!(), "/api/v1/");

/// Instagram scraping endpoints.
#[derive(Debug)]
pub enum Instagram {}

impl Service for Instagram {
    const NAME: &'static str = "instagram";
    const URL_KEY: &'static str = "instagram_url";
    const DEFAULT_BASE_URL: Option<&'static str> = Some(TASKORA_API_V1);
}

/// Quiz question endpoints.
#[derive(Debug)]
pub enum Quiz {}

impl Service for Quiz {
    const NAME: &'static str = "quiz";
    const URL_KEY: &'static str = "quiz_url";
    const DEFAULT_BASE_URL: Option<&'static str> = Some(TASKORA_HOST);
}

/// Chatbot proxy. Has no public default deployment; a base URL is required.
#[derive(Debug)]
pub enum Chatbot {}

impl Service for Chatbot {
    const NAME: &'static str = "chatbot";
    const URL_KEY: &'static str = "chatbot_url";
    const DEFAULT_BASE_URL: Option<&'static str> = None;
}

/// reCAPTCHA v3 solver.
#[derive(Debug)]
pub enum Captcha {}

impl Service for Captcha {
    const NAME: &'static str = "captcha";
    const URL_KEY: &'static str = "captcha_url";
    const DEFAULT_BASE_URL: Option<&'static str> = Some(TASKORA_HOST);
}
