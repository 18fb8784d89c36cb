/// Observable value. Every effective write bumps the revision, which
/// dependent [`Memo`]s compare against to decide whether to recompute.
#[derive(Debug, Clone, Default)]
pub struct Signal<T> {
    value: T,
    revision: u64,
}

impl<T: PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self { value, revision: 0 }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Store `value`. Writing an equal value is not a change.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.revision += 1;
        true
    }

    /// Mutate in place; the revision is bumped only if the value changed
    pub fn update<F>(&mut self, f: F) -> bool
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        let before = self.value.clone();
        f(&mut self.value);
        if self.value != before {
            self.revision += 1;
            true
        } else {
            false
        }
    }
}

/// Derived value cached against the revisions of its inputs
#[derive(Debug, Clone, Default)]
pub struct Memo<T> {
    value: T,
    deps: Option<Vec<u64>>,
    evaluations: u64,
}

impl<T: Default> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate `compute` when `deps` differ from the last evaluation.
    /// Returns true when a recomputation ran.
    pub fn refresh<F>(&mut self, deps: &[u64], compute: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        if self.deps.as_deref() == Some(deps) {
            return false;
        }
        compute(&mut self.value);
        self.deps = Some(deps.to_vec());
        self.evaluations += 1;
        true
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
