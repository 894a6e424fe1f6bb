/// One selectable entry: a stable key, the text shown (and filtered against),
/// and a disabled flag. Disabled items stay visible but cannot be focused or
/// chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectItem {
    pub key: String,
    pub text: String,
    pub disabled: bool,
}

impl SelectItem {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Ordered registry of the live item set.
///
/// Insertion order is registration order, which is what the list renders in.
/// Keys are unique: re-registering an existing key updates its text/disabled
/// state in place without moving it. Unregistering an unknown key is a no-op.
#[derive(Clone, Debug, Default)]
pub struct ItemRegistry {
    items: Vec<SelectItem>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        key: impl Into<String>,
        text: impl Into<String>,
        disabled: bool,
    ) {
        let key = key.into();
        let text = text.into();
        if let Some(existing) = self.items.iter_mut().find(|i| i.key == key) {
            existing.text = text;
            existing.disabled = disabled;
            return;
        }
        self.items.push(SelectItem {
            key,
            text,
            disabled,
        });
    }

    pub fn unregister(&mut self, key: &str) {
        self.items.retain(|i| i.key != key);
    }

    pub fn items(&self) -> &[SelectItem] {
        &self.items
    }

    pub fn get(&self, key: &str) -> Option<&SelectItem> {
        self.items.iter().find(|i| i.key == key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_in_order() {
        let mut r = ItemRegistry::new();
        r.register("a", "Apple", false);
        r.register("b", "Banana", false);
        let keys: Vec<&str> = r.items().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn reregistration_overwrites_in_place() {
        let mut r = ItemRegistry::new();
        r.register("a", "Apple", false);
        r.register("b", "Banana", false);
        r.register("a", "Apricot", true);

        assert_eq!(r.len(), 2);
        let first = &r.items()[0];
        assert_eq!(first.key, "a");
        assert_eq!(first.text, "Apricot");
        assert!(first.disabled);
    }

    #[test]
    fn unregister_unknown_key_is_noop() {
        let mut r = ItemRegistry::new();
        r.register("a", "Apple", false);
        r.unregister("zzz");
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn unregister_removes_only_that_key() {
        let mut r = ItemRegistry::new();
        r.register("a", "Apple", false);
        r.register("b", "Banana", false);
        r.register("c", "Cherry", false);
        r.unregister("b");
        let keys: Vec<&str> = r.items().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, ["a", "c"]);
    }
}
