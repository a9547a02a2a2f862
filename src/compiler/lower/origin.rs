/// Maps every lowered instruction back to the index of the source
/// instruction that produced it.  Entry `i` belongs to lowered instruction `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddressOriginMap {
    origins: Vec<usize>,
}

impl AddressOriginMap {
    pub(super) fn new(origins: Vec<usize>) -> AddressOriginMap {
        AddressOriginMap { origins }
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// The source instruction that lowered instruction `target` came from.
    pub fn origin_of(&self, target: usize) -> Option<usize> {
        self.origins.get(target).copied()
    }

    /// The lowered instructions which source instruction `source` produced.
    /// Empty if it produced none.
    pub fn targets_of(&self, source: usize) -> Vec<usize> {
        self.origins
            .iter()
            .enumerate()
            .filter(|(_, &o)| o == source)
            .map(|(t, _)| t)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.origins.iter().copied()
    }
}
