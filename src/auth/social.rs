//! Social login buttons. There is no OAuth: each provider is a fixed
//! redirect.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    GitHub,
}

impl SocialProvider {
    pub fn redirect_url(&self) -> &'static str {
        match self {
            SocialProvider::Google => "https://accounts.google.com",
            SocialProvider::GitHub => "https://github.com",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::GitHub => "GitHub",
        }
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "github" => Ok(SocialProvider::GitHub),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}
