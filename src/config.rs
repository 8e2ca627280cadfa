//! Token resolution
//!
//! A GitHub token is looked up from the --token flag first, then the
//! GH_TOKEN environment variable, then a compiled-in fallback.

use std::env;

// Fallback token. Leave this empty and use the flag or GH_TOKEN instead;
// embedding a token in the binary is a security risk.
const STATIC_TOKEN: &str = "";

/// Resolve the GitHub token, or None if no source provides one.
pub fn resolve_token(flag: Option<&str>) -> Option<String> {
    let env_token = env::var("GH_TOKEN").ok();
    resolve_from(flag, env_token.as_deref())
}

fn resolve_from(flag: Option<&str>, env_token: Option<&str>) -> Option<String> {
    if let Some(token) = flag {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }
    if let Some(token) = env_token {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }
    if !STATIC_TOKEN.is_empty() {
        return Some(STATIC_TOKEN.to_string());
    }
    None
}
