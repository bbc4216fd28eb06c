use url::Url;

/// Which path the target server exposes for playback-state changes. The API
/// renamed `/playback` to `/state` between revisions; a given server speaks
/// exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPath {
    #[default]
    Playback,
    State,
}

impl PlaybackPath {
    pub fn segment(&self) -> &'static str {
        match self {
            PlaybackPath::Playback => "playback",
            PlaybackPath::State => "state",
        }
    }
}

impl std::str::FromStr for PlaybackPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playback" => Ok(PlaybackPath::Playback),
            "state" => Ok(PlaybackPath::State),
            other => Err(format!(
                "unknown playback path '{other}' (expected 'playback' or 'state')"
            )),
        }
    }
}

/// Connection details for one target server. The session cookie and CSRF
/// token come from an interactive login performed out-of-band; the harness
/// only carries them.
#[derive(Debug, Clone)]
pub struct Target {
    pub base_url: Url,
    pub csrf_token: String,
    /// Value of the `session` cookie established by the login flow.
    pub session_cookie: String,
}

impl Target {
    pub fn new(base_url: Url, csrf_token: impl Into<String>, session_cookie: impl Into<String>) -> Self {
        Self {
            base_url,
            csrf_token: csrf_token.into(),
            session_cookie: session_cookie.into(),
        }
    }
}
