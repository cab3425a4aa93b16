//! Central configuration constants for the API client and the dispatch path.

/// Namespace shared by every action type of the repository slice.
pub const ACTION_PREFIX: &str = "propelhub/user/";

/// API root used when neither a flag nor the environment provides one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Endpoint paths, relative to the API root.
pub const REPO_PATH: &str = "repo";
pub const COMMIT_PATH: &str = "commit";
pub const BUILDS_PATH: &str = "builds";

/// Capacity of the channel carrying follow-up actions back from effect tasks.
pub const ACTION_CHANNEL_CAPACITY: usize = 100;

/// Capacity of the broadcast stream observers subscribe to.
/// Slow subscribers lag rather than block dispatch.
pub const ACTION_STREAM_CAPACITY: usize = 256;

pub const TOKEN_ENV: &str = "PROPELHUB_TOKEN";
pub const API_URL_ENV: &str = "PROPELHUB_API_URL";

/// File name of the stored credential inside the config directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Strip trailing slashes so endpoint paths can be joined with a single `/`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_removed() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/api//"),
            "http://localhost:8080/api"
        );
        assert_eq!(normalize_base_url(" http://h/api "), "http://h/api");
    }
}
