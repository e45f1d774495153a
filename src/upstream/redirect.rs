//! Redirect-following policy.

use reqwest::redirect::Policy;

/// Follow redirects until `max_hops` requests have been made, then hand
/// back the latest (redirect) response instead of failing.
pub fn redirect_policy(max_hops: usize) -> Policy {
    Policy::custom(move |attempt| {
        if should_follow(attempt.previous().len(), max_hops) {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}

/// `visited` counts the requests already made in the chain, including the
/// original one.
pub fn should_follow(visited: usize, max_hops: usize) -> bool {
    visited < max_hops
}
