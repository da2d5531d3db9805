use std::hash::BuildHasher;

use xxhash_rust::xxh3::Xxh3;

/// Unseeded xxh3 hasher for child maps.
///
/// Keeps child iteration order (and with it the collapse fold order)
/// identical from run to run, which the std `RandomState` does not.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DeterministicState;

impl BuildHasher for DeterministicState {
    type Hasher = Xxh3;

    fn build_hasher(&self) -> Xxh3 {
        Xxh3::new()
    }
}
