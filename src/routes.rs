//! Screen routes and their path form, e.g. `/session?deck=HSK%201`.

use crate::error::RouteError;
use std::fmt;

/// Why the deck selection screen was opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Session,
    Editor,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Session => "session",
            Mode::Editor => "editor",
        }
    }

    fn parse(value: &str) -> Result<Self, RouteError> {
        match value {
            "session" => Ok(Mode::Session),
            "editor" => Ok(Mode::Editor),
            other => Err(RouteError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    DeckSelection { mode: Mode },
    Editor { deck: String },
    Session { deck: String },
}

impl Route {
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::DeckSelection { mode } => format!("/deck-selection?mode={}", mode.as_str()),
            Route::Editor { deck } => format!("/editor?deck={}", urlencoding::encode(deck)),
            Route::Session { deck } => format!("/session?deck={}", urlencoding::encode(deck)),
        }
    }

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let (page, query) = path.split_once('?').unwrap_or((path, ""));
        let page = page.trim_end_matches('/');

        match page {
            "" => Ok(Route::Home),
            "/deck-selection" => {
                let raw = query_param(query, "mode")?.ok_or(RouteError::MissingParam("mode"))?;
                let mode = Mode::parse(&raw)?;
                Ok(Route::DeckSelection { mode })
            }
            "/editor" => Ok(Route::Editor {
                deck: query_param(query, "deck")?.ok_or(RouteError::MissingParam("deck"))?,
            }),
            "/session" => Ok(Route::Session {
                deck: query_param(query, "deck")?.ok_or(RouteError::MissingParam("deck"))?,
            }),
            other => Err(RouteError::UnknownPath(other.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// First value of `name` in a `a=1&b=2` query string, percent-decoded.
fn query_param(query: &str, name: &str) -> Result<Option<String>, RouteError> {
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == name {
            let decoded =
                urlencoding::decode(value).map_err(|e| RouteError::Encoding(e.to_string()))?;
            return Ok(Some(decoded.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(
            Route::DeckSelection { mode: Mode::Editor }.to_path(),
            "/deck-selection?mode=editor"
        );
        let deck = "HSK 1".to_string();
        assert_eq!(Route::Session { deck }.to_path(), "/session?deck=HSK%201");
    }

    #[test]
    fn test_deck_name_is_percent_encoded() {
        let deck = "汉字 & more?".to_string();
        let route = Route::Editor { deck };
        let path = route.to_path();

        assert!(!path.contains(' '));
        assert!(!path["/editor?".len()..].contains('&'));
        assert_eq!(Route::parse(&path), Ok(route));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Route::parse("/"), Ok(Route::Home));
        assert_eq!(Route::parse(""), Ok(Route::Home));
        let mode = Mode::Session;
        assert_eq!(
            Route::parse("/deck-selection?mode=session"),
            Ok(Route::DeckSelection { mode })
        );
        let deck = "HSK 1".to_string();
        assert_eq!(Route::parse("/session?deck=HSK%201"), Ok(Route::Session { deck }));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Route::parse("/settings"),
            Err(RouteError::UnknownPath("/settings".to_string()))
        );
        assert_eq!(
            Route::parse("/deck-selection?mode=quiz"),
            Err(RouteError::UnknownMode("quiz".to_string()))
        );
        assert_eq!(Route::parse("/editor"), Err(RouteError::MissingParam("deck")));
    }
}
