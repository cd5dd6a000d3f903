use std::rc::Rc;

use narvis_common::Narrative;

use crate::{
    api::NarvisApi,
    error::{ClientError, Result},
    session::SessionStore,
};

/// Lifecycle of one dashboard mount's narrative fetch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Narrative>),
    Failed(ClientError),
}

impl LoadState {
    /// True when the failure means the session is gone and the user must log in again
    pub const fn needs_login(&self) -> bool {
        matches!(self, Self::Failed(ClientError::AuthRejected(_)))
    }
}

impl From<Result<Vec<Narrative>>> for LoadState {
    fn from(value: Result<Vec<Narrative>>) -> Self {
        match value {
            Ok(narratives) => Self::Loaded(narratives),
            Err(error) => Self::Failed(error),
        }
    }
}

/// A cell of the dashboard grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Narrative(Narrative),
    /// Call to action for creating a narrative, always the last tile
    CreateNew,
}

impl Tile {
    pub fn key(&self) -> String {
        match self {
            Self::Narrative(narrative) => format!("narrative-{}", narrative.id),
            Self::CreateNew => "create-new".to_owned(),
        }
    }
}

/// Grid contents for `narratives`: one tile each, in the given order, then the create tile
pub fn tiles(narratives: &[Narrative]) -> Vec<Tile> {
    narratives
        .iter()
        .cloned()
        .map(Tile::Narrative)
        .chain(std::iter::once(Tile::CreateNew))
        .collect()
}

/// Fetches the current user's narratives with the stored session token
#[derive(Clone)]
pub struct NarrativeLoader {
    api: Rc<dyn NarvisApi>,
    session: SessionStore,
}

impl NarrativeLoader {
    pub fn new(api: Rc<dyn NarvisApi>, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Run one fetch. Without a live token no request is made.
    pub async fn load(&self) -> LoadState {
        let Some(token) = self.session.get() else {
            log::info!("Skipping narrative fetch, no active session");
            return LoadState::Failed(ClientError::AuthRejected(
                "Your session has ended, please log in again".to_owned(),
            ));
        };
        let result = self.api.narratives(&token).await;
        if let Err(error) = &result {
            log::error!("Unable to load narratives: {error}");
        }
        result.into()
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use mockall::predicate::eq;
    use narvis_common::Narrative;
    use rstest::rstest;

    use super::{tiles, LoadState, NarrativeLoader, Tile};
    use crate::{
        api::MockNarvisApi,
        error::ClientError,
        session::{fixtures::memory_session, SessionToken},
    };

    fn narrative(id: &str, title: &str, description: &str) -> Narrative {
        Narrative {
            id: id.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
        }
    }

    #[test]
    fn tiles_should_append_create_tile() {
        let tiles = tiles(&[narrative("1", "X", "Y")]);

        assert_eq!(
            tiles,
            vec![Tile::Narrative(narrative("1", "X", "Y")), Tile::CreateNew],
            "one data tile then the create tile"
        );
    }

    #[test]
    fn tiles_should_keep_server_order() {
        let tiles = tiles(&[narrative("b", "B", ""), narrative("a", "A", "")]);
        let keys: Vec<String> = tiles.iter().map(Tile::key).collect();

        assert_eq!(keys, ["narrative-b", "narrative-a", "create-new"], "order");
    }

    #[test]
    fn tiles_for_empty_collection() {
        assert_eq!(tiles(&[]), vec![Tile::CreateNew], "only the create tile");
    }

    #[tokio::test]
    async fn load_should_send_bearer_token() {
        let (session, _) = memory_session();
        session.set(SessionToken::new("t0k")).expect("set");
        let mut api = MockNarvisApi::new();
        api.expect_narratives()
            .with(eq(SessionToken::new("t0k")))
            .times(1)
            .returning(|_| Ok(vec![narrative("1", "X", "Y")]));
        let loader = NarrativeLoader::new(Rc::new(api), session);

        let state = loader.load().await;

        assert_eq!(state, LoadState::Loaded(vec![narrative("1", "X", "Y")]), "loaded");
    }

    #[tokio::test]
    async fn load_without_session_should_not_send_request() {
        let (session, _) = memory_session();
        let mut api = MockNarvisApi::new();
        api.expect_narratives().times(0);
        let loader = NarrativeLoader::new(Rc::new(api), session);

        let state = loader.load().await;

        assert!(state.needs_login(), "redirect to login, got {state:?}");
    }

    #[tokio::test]
    async fn load_after_clear_should_not_send_request() {
        let (session, _) = memory_session();
        session.set(SessionToken::new("t0k")).expect("set");
        session.clear();
        let mut api = MockNarvisApi::new();
        api.expect_narratives().times(0);
        let loader = NarrativeLoader::new(Rc::new(api), session);

        assert!(loader.load().await.needs_login(), "cleared session");
    }

    #[rstest]
    #[case::rejected(ClientError::AuthRejected("Could not validate credentials".to_owned()), true)]
    #[case::network(ClientError::Network("unreachable".to_owned()), false)]
    #[case::server(ClientError::Server("boom".to_owned()), false)]
    #[tokio::test]
    async fn load_failure_should_be_distinct_from_empty(
        #[case] error: ClientError,
        #[case] needs_login: bool,
    ) {
        let (session, _) = memory_session();
        session.set(SessionToken::new("t0k")).expect("set");
        let mut api = MockNarvisApi::new();
        let returned = error.clone();
        api.expect_narratives()
            .returning(move |_| Err(returned.clone()));
        let loader = NarrativeLoader::new(Rc::new(api), session);

        let state = loader.load().await;

        assert_eq!(state, LoadState::Failed(error), "failed state");
        assert_ne!(state, LoadState::Loaded(Vec::new()), "not an empty collection");
        assert_eq!(state.needs_login(), needs_login, "login redirect");
    }

    #[tokio::test]
    async fn reload_should_refetch_and_replace() {
        let (session, _) = memory_session();
        session.set(SessionToken::new("t0k")).expect("set");
        let mut responses = vec![
            vec![narrative("1", "Old", "")],
            vec![narrative("2", "New", "")],
        ];
        let mut api = MockNarvisApi::new();
        api.expect_narratives()
            .times(2)
            .returning(move |_| Ok(responses.remove(0)));
        let loader = NarrativeLoader::new(Rc::new(api), session);

        let first = loader.load().await;
        let second = loader.load().await;

        assert_eq!(first, LoadState::Loaded(vec![narrative("1", "Old", "")]), "first mount");
        assert_eq!(second, LoadState::Loaded(vec![narrative("2", "New", "")]), "no stale tiles");
    }
}
