//! Text recognition boundary.
//!
//! A recognition engine hands out sessions. A session is configured with a
//! language hint, runs recognition on image bytes and is released afterwards.
//! [`recognize_text`] wraps the session in a [`SessionGuard`] so release
//! happens on every exit path.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::{create_engine_from_dir, PureOcrEngine, PureOcrSession};

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use tracing::debug;

use crate::error::OcrError;

/// Languages the engine should expect, e.g. `vie+eng`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageHint {
    codes: Vec<String>,
}

impl LanguageHint {
    /// Build a hint from ISO 639-2 style codes.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// The individual language codes.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

impl Default for LanguageHint {
    fn default() -> Self {
        Self::new(["vie", "eng"])
    }
}

impl FromStr for LanguageHint {
    type Err = OcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let codes: Vec<String> = s
            .split('+')
            .map(|code| code.trim().to_lowercase())
            .filter(|code| !code.is_empty())
            .collect();

        if codes.is_empty() {
            return Err(OcrError::UnsupportedLanguage(s.to_string()));
        }

        Ok(Self { codes })
    }
}

impl fmt::Display for LanguageHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codes.join("+"))
    }
}

/// Source of recognition sessions.
pub trait RecognitionEngine {
    /// Session type handed out by this engine.
    type Session: RecognitionSession;

    /// Acquire a fresh session.
    fn acquire(&self) -> Result<Self::Session, OcrError>;
}

/// One acquired recognition session.
pub trait RecognitionSession {
    /// Load whatever the session needs for `language`.
    fn configure(&mut self, language: &LanguageHint) -> Result<(), OcrError>;

    /// Recognize the text in encoded image bytes.
    fn recognize(&mut self, image: &[u8]) -> Result<String, OcrError>;

    /// Free the session's resources. Called exactly once by [`SessionGuard`].
    fn release(&mut self);
}

/// Releases the wrapped session when dropped.
pub struct SessionGuard<S: RecognitionSession> {
    session: S,
}

impl<S: RecognitionSession> SessionGuard<S> {
    /// Take ownership of an acquired session.
    pub fn new(session: S) -> Self {
        Self { session }
    }
}

impl<S: RecognitionSession> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: RecognitionSession> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: RecognitionSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        debug!("releasing recognition session");
        self.session.release();
    }
}

/// Run one recognition: acquire, configure, recognize, release.
///
/// Empty or whitespace-only output is reported as [`OcrError::NoText`].
pub fn recognize_text<E: RecognitionEngine>(
    engine: &E,
    image: &[u8],
    language: &LanguageHint,
) -> Result<String, OcrError> {
    let mut session = SessionGuard::new(engine.acquire()?);
    session.configure(language)?;

    let text = session.recognize(image)?;
    if text.trim().is_empty() {
        return Err(OcrError::NoText);
    }

    Ok(text)
}


#[cfg(test)]
mod tests {
    use super::testing::{Script, ScriptedEngine};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_hint_parse() {
        let hint: LanguageHint = "vie+eng".parse().unwrap();
        assert_eq!(hint, LanguageHint::default());
        assert_eq!(hint.to_string(), "vie+eng");

        let hint: LanguageHint = " POL + eng ".parse().unwrap();
        assert_eq!(hint.codes(), ["pol".to_string(), "eng".to_string()]);

        assert!("".parse::<LanguageHint>().is_err());
        assert!("+".parse::<LanguageHint>().is_err());
    }

    #[test]
    fn test_session_released_on_success() {
        let engine = ScriptedEngine::new(Script::Text("Tổng: 150.000"));
        let text = recognize_text(&engine, b"img", &LanguageHint::default()).unwrap();

        assert_eq!(text, "Tổng: 150.000");
        assert_eq!(engine.acquired(), 1);
        assert_eq!(engine.released(), 1);
    }

    #[test]
    fn test_session_released_on_failure() {
        let engine = ScriptedEngine::new(Script::Fail);
        let err = recognize_text(&engine, b"img", &LanguageHint::default()).unwrap_err();

        assert!(matches!(err, OcrError::Recognition(_)));
        assert_eq!(engine.released(), 1);
    }

    #[test]
    fn test_session_released_on_configure_failure() {
        let engine = ScriptedEngine::new(Script::Text("42"));
        let hint = LanguageHint::new(["xxx"]);
        let err = recognize_text(&engine, b"img", &hint).unwrap_err();

        assert!(matches!(err, OcrError::UnsupportedLanguage(_)));
        assert_eq!(engine.released(), 1);
    }

    #[test]
    fn test_empty_text_is_failure() {
        let engine = ScriptedEngine::new(Script::Text("  \n "));
        let err = recognize_text(&engine, b"img", &LanguageHint::default()).unwrap_err();

        assert!(matches!(err, OcrError::NoText));
        assert_eq!(engine.released(), 1);
    }
}
