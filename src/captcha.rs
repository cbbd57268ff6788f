//! reCAPTCHA v3 solver. Solving runs on the server; the client only forwards
//! the widget's anchor URL.

use crate::endpoint::endpoints;
use crate::service::Captcha;

endpoints! {
    Captcha;

    /// Solves the challenge behind `anchor_url` (the reCAPTCHA widget's anchor URL).
    fn rechaptcha_v3_solver(anchor_url) => Get "/api/v1/recaptcha-solver/v3";
    /// Validity and expiry of the key.
    fn rechaptcha_key_status() => Get "/api/v1/recaptcha-solver/validate_key";
}
