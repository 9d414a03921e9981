use crate::lastfm::SoundtrackProvider;
use crate::llm::QueryAssistant;
use crate::tmdb::MovieProvider;

/// Shared handler state: one explicitly constructed client per external
/// concern. All three are cheap to clone (reqwest clients are reference
/// counted internally), so the state derives `Clone` for Axum.
#[derive(Clone)]
pub struct HandlerState<M, S, A>
where
    M: MovieProvider + Clone + Send + Sync + 'static,
    S: SoundtrackProvider + Clone + Send + Sync + 'static,
    A: QueryAssistant + Clone + Send + Sync + 'static,
{
    pub movies: M,
    pub soundtracks: S,
    pub assistant: A,
}

impl<M, S, A> HandlerState<M, S, A>
where
    M: MovieProvider + Clone + Send + Sync + 'static,
    S: SoundtrackProvider + Clone + Send + Sync + 'static,
    A: QueryAssistant + Clone + Send + Sync + 'static,
{
    pub fn new(movies: M, soundtracks: S, assistant: A) -> Self {
        Self {
            movies,
            soundtracks,
            assistant,
        }
    }
}
