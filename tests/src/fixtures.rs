//! Shared fixtures: a seeded platform over the in-memory store.

use std::sync::Arc;

use platform_runtime::{Platform, PlatformConfig, WorkSpec};
use platform_store::{FixedTimeSource, InMemoryStore};
use shared_types::{Actor, BookType, Clientele, Party, PartyId, Role, Work};

/// A platform over the in-memory store and a fixed clock.
pub type TestPlatform = Platform<InMemoryStore, FixedTimeSource>;

/// Fixed test instant (2023-11-14T22:13:20Z).
pub const T0: u64 = 1_700_000_000;

/// Builds a platform with default rates over a frozen clock.
pub fn platform() -> (TestPlatform, Arc<InMemoryStore>, Arc<FixedTimeSource>) {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(FixedTimeSource::at(T0));
    let platform = Platform::new(store.clone(), clock.clone(), PlatformConfig::default());
    (platform, store, clock)
}

/// Registers a party with the given role and returns its actor.
pub fn actor(platform: &TestPlatform, role: Role, scope: Option<Clientele>) -> Actor {
    let party = Party {
        id: PartyId::generate(),
        name: format!("{role} fixture"),
        role,
        partner_scope: scope,
    };
    platform.register_party(party.clone()).unwrap();
    Actor::new(party.id, role)
}

/// Registers a catalog work through the facade.
pub fn work(
    platform: &TestPlatform,
    executive: &Actor,
    price: u64,
    initial_stock: u32,
    author: Option<PartyId>,
    book_type: BookType,
    clientele: Clientele,
) -> Work {
    platform
        .register_work(
            executive,
            WorkSpec {
                title: "fixture work".to_string(),
                discipline: "mathematics".to_string(),
                price,
                initial_stock,
                min_stock: 1,
                author,
                book_type,
                clientele,
            },
        )
        .unwrap()
}
