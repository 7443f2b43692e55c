//! One-shot snapshot of live target instances

use std::collections::HashMap;

use super::SceneHost;

/// Live instances per target name, captured once when the host is ready
#[derive(Debug, Clone)]
pub struct TargetCache<T> {
    instances: HashMap<String, Vec<T>>,
}

impl<T> Default for TargetCache<T> {
    fn default() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }
}

impl<T: Clone> TargetCache<T> {
    /// Query `host` once for every name in `names`
    pub fn snapshot<'a, H, I>(host: &H, names: I) -> Self
    where
        H: SceneHost<Target = T>,
        I: IntoIterator<Item = &'a String>,
    {
        let mut cache = Self::default();
        for name in names {
            let found = host.find_live_instances(name);
            if !found.is_empty() {
                cache.instances.insert(name.clone(), found);
            }
        }

        log::debug!(
            "Cached {} live target(s) across {} name(s)",
            cache.len(),
            cache.instances.len()
        );
        cache
    }

    /// Live instances named `name`, in host order
    pub fn instances(&self, name: &str) -> &[T] {
        self.instances.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of cached instances
    pub fn len(&self) -> usize {
        self.instances.values().map(Vec::len).sum()
    }

    /// Whether no instance was found
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
