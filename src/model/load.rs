//! Tri-state load status shared by every screen that fetches remote data.
//!
//! A `Loader` tracks the current `LoadState` together with a request
//! generation. Each call to `begin` supersedes earlier requests: outcomes are
//! applied only when they carry the ticket of the latest generation, so a slow
//! response can never overwrite a newer one.

/// What a screen renders: spinner, data, or an error with a retry control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Success(T),
    Failure(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Proof that an outcome belongs to a particular request generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct Loader<T> {
    state: LoadState<T>,
    generation: u64,
}

impl<T> Loader<T> {
    pub fn new() -> Self {
        Self { state: LoadState::Loading, generation: 0 }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Enter `Loading` for a new request and return its ticket.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = LoadState::Loading;
        Ticket(self.generation)
    }

    /// Start over after a failure. Does nothing in any other state.
    pub fn retry(&mut self) -> Option<Ticket> {
        match self.state {
            LoadState::Failure(_) => Some(self.begin()),
            _ => None,
        }
    }

    /// Apply an outcome. Returns `false` when the ticket is stale or the
    /// request has already been settled.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if ticket.0 != self.generation || !self.state.is_loading() {
            return false;
        }
        self.state = match outcome {
            Ok(data) => LoadState::Success(data),
            Err(message) => LoadState::Failure(message),
        };
        true
    }
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_without_data_or_error() {
        let loader: Loader<u32> = Loader::new();
        assert!(loader.state().is_loading());
        assert_eq!(loader.state().data(), None);
        assert_eq!(loader.state().error(), None);
    }

    #[test]
    fn success_stores_data() {
        let mut loader = Loader::new();
        let ticket = loader.begin();
        assert!(loader.resolve(ticket, Ok("artist")));
        assert_eq!(loader.state(), &LoadState::Success("artist"));
    }

    #[test]
    fn failure_stores_message() {
        let mut loader: Loader<()> = Loader::new();
        let ticket = loader.begin();
        assert!(loader.resolve(ticket, Err("network down".to_string())));
        assert_eq!(loader.state().error(), Some("network down"));
    }

    #[test]
    fn retry_only_from_failure() {
        let mut loader: Loader<u8> = Loader::new();
        let first = loader.begin();
        assert_eq!(loader.retry(), None, "retry while loading");

        loader.resolve(first, Err("boom".into()));
        let second = loader.retry().expect("retry from failure");
        assert_eq!(second.generation(), first.generation() + 1);
        assert!(loader.state().is_loading());
        assert_eq!(loader.state().error(), None);

        loader.resolve(second, Ok(1));
        assert_eq!(loader.retry(), None, "success is terminal");
    }

    #[test]
    fn stale_outcome_is_dropped() {
        let mut loader = Loader::new();
        let old = loader.begin();
        let new = loader.begin();

        assert!(loader.resolve(new, Ok("new")));
        assert!(!loader.resolve(old, Ok("old")));
        assert_eq!(loader.state().data(), Some(&"new"));
    }

    #[test]
    fn older_request_finishing_first_does_not_settle_newer_one() {
        let mut loader = Loader::new();
        let old = loader.begin();
        let new = loader.begin();

        assert!(!loader.resolve(old, Err("late failure".into())));
        assert!(loader.state().is_loading());
        assert!(loader.resolve(new, Ok(7)));
        assert_eq!(loader.state().data(), Some(&7));
    }

    #[test]
    fn duplicate_outcome_is_ignored() {
        let mut loader = Loader::new();
        let ticket = loader.begin();
        assert!(loader.resolve(ticket, Ok(1)));
        assert!(!loader.resolve(ticket, Ok(2)));
        assert_eq!(loader.state().data(), Some(&1));
    }
}
