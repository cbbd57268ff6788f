//! Chatbot proxy endpoints. The chatbot service has no default deployment, so
//! clients are built with [`with_base_url`](crate::AsyncClient::with_base_url)
//! or a `chatbot_url` from the environment.

use crate::endpoint::endpoints;
use crate::service::Chatbot;

endpoints! {
    Chatbot;

    /// Sends `message` and returns the chatbot's reply.
    fn chatbot(message) => Post "/api/v1/chatbot";
    /// Expiration and usage limits of the key.
    fn validate_key() => Get "/api/v1/chatbot/validate_key";
}
