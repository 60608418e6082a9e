use uspy_model::SubjectKey;

/// Identifies one navigation of a view: the subject requested and a
/// generation number that grows on every navigation.
///
/// Two tickets for the same key are still different if they come from
/// different navigations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    key: SubjectKey,
    generation: u64,
}

impl LoadTicket {
    pub(crate) const fn new(key: SubjectKey, generation: u64) -> Self {
        Self { key, generation }
    }

    pub const fn key(&self) -> &SubjectKey {
        &self.key
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
