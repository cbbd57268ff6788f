//! Instagram scraping endpoints. Scraping happens server-side; every method
//! returns the server's JSON untouched.

use crate::endpoint::endpoints;
use crate::service::Instagram;

endpoints! {
    Instagram;

    /// Fetches a public post (`GET get`).
    fn get_post(url) => Get "get";
    /// Fetches a public post through the alternate `GET GET` route.
    fn get_post_alt(url) => Get "GET";
    /// Stream metadata for an HLS video.
    fn get_hls_stream(url) => Get "hls";
    /// Download links of a post or reel.
    fn get_links(url) => Post "links";
    fn get_profile(username) => Post "profile";
    /// Active stories of a user.
    fn get_stories(username) => Post "stories";
    fn get_story(story_id) => Post "story";
    fn get_highlights(username) => Post "highlights";
    /// Stories inside one highlight reel.
    fn get_highlight_stories(highlight_id) => Post "highlight_stories";
    fn get_user_info(username) => Post "userInfo";
    fn get_reels(username) => Post "reels";
    fn get_posts(username) => Post "posts";
    /// Key status, rate limits and expiry.
    fn validate_key() => Get "instagram/validate_key";
}
