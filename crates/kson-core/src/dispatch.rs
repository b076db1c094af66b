use crate::{
    adapter::{ErasedAdapter, KsonRecord},
    registry::{Kson, TypeAdapterFactory},
    token::TypeToken,
};

///
/// DispatchEntry
///
/// One record known to a generated factory.
///

#[derive(Clone, Copy)]
pub struct DispatchEntry {
    token: fn() -> TypeToken,
    build: fn(&Kson) -> ErasedAdapter,
}

impl DispatchEntry {
    #[must_use]
    pub const fn of<T: KsonRecord>() -> Self {
        Self {
            token: T::type_token,
            build: ErasedAdapter::record::<T>,
        }
    }

    #[must_use]
    pub fn token(&self) -> TypeToken {
        (self.token)()
    }
}

impl std::fmt::Debug for DispatchEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DispatchEntry")
            .field(&self.token().to_string())
            .finish()
    }
}

///
/// DispatchTable
///
/// Static entry list of a generated factory, in discovery order.
///

#[derive(Clone, Copy, Debug)]
pub struct DispatchTable {
    entries: &'static [DispatchEntry],
}

impl DispatchTable {
    #[must_use]
    pub const fn new(entries: &'static [DispatchEntry]) -> Self {
        Self { entries }
    }

    #[must_use]
    pub const fn entries(&self) -> &'static [DispatchEntry] {
        self.entries
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry serving `requested`.
    ///
    /// An exact type match always wins; otherwise the first entry, in declaration order, that
    /// the requested type is assignable to.
    #[must_use]
    pub fn find(&self, requested: &TypeToken) -> Option<&'static DispatchEntry> {
        let entries = self.entries;

        entries
            .iter()
            .find(|entry| entry.token() == *requested)
            .or_else(|| {
                entries
                    .iter()
                    .find(|entry| requested.is_assignable_to(&entry.token()))
            })
    }

    #[must_use]
    pub fn create(&self, kson: &Kson, requested: &TypeToken) -> Option<ErasedAdapter> {
        let entry = self.find(requested)?;
        tracing::trace!(requested = %requested, entry = %entry.token(), "dispatch table match");

        Some((entry.build)(kson))
    }
}

impl TypeAdapterFactory for DispatchTable {
    fn create(&self, kson: &Kson, token: &TypeToken) -> Option<ErasedAdapter> {
        Self::create(self, kson, token)
    }
}
