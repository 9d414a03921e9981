//! Canned soundtrack provider for tests.

use async_trait::async_trait;

use super::error::LastfmError;
use super::model::Soundtrack;
use super::SoundtrackProvider;

#[derive(Debug, Clone, Default)]
pub struct MockSoundtrackProvider {
    soundtrack: Soundtrack,
    fail: bool,
}

impl MockSoundtrackProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_soundtrack(mut self, soundtrack: Soundtrack) -> Self {
        self.soundtrack = soundtrack;
        self
    }

    /// Every lookup returns an error, simulating a provider outage.
    pub fn failing() -> Self {
        Self {
            soundtrack: Soundtrack::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl SoundtrackProvider for MockSoundtrackProvider {
    async fn movie_soundtrack(
        &self,
        _title: &str,
        _year: Option<&str>,
    ) -> Result<Soundtrack, LastfmError> {
        if self.fail {
            return Err(LastfmError::MissingApiKey);
        }
        Ok(self.soundtrack.clone())
    }
}
