use super::collection_store::CollectionStore;
use super::mem_backend::MemBackend;
use crate::fixtures::Seed;

pub type InMemoryStore = CollectionStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        CollectionStore::with_backend(MemBackend::new())
    }

    pub fn seeded(seed: Seed) -> Self {
        CollectionStore::with_seed(MemBackend::new(), seed)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::fixtures::{admin_user, learner_user, mentor_user};
    use crate::model::User;
    use crate::store::DataStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn empty() -> Self {
            Self {
                store: InMemoryStore::seeded(Seed::empty()),
            }
        }

        pub fn signed_in_as(mut self, user: &User) -> Self {
            self.store.set_current_user(user).unwrap();
            self
        }

        pub fn as_learner(self) -> Self {
            self.signed_in_as(&learner_user())
        }

        pub fn as_mentor(self) -> Self {
            self.signed_in_as(&mentor_user())
        }

        pub fn as_admin(self) -> Self {
            self.signed_in_as(&admin_user())
        }
    }
}
