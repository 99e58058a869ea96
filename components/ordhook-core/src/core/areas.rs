use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Only a type that implements this trait may be stored in a permanent
/// area. The trait is sealed (its only impl site is this crate) so a
/// downstream consumer can't smuggle a foreign type into another module's
/// per-inscription state — mirroring the "private generics" restriction
/// the source system enforces on its own write APIs.
pub trait PermanentAreaValue: Any + Send + Sync {}

/// Same restriction for the temporary area.
pub trait TemporaryAreaValue: Any + Send + Sync {}

struct Bag {
    values: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Bag {
    fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    fn add<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Box::new(value));
    }

    fn contains<T: Any>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    fn borrow<T: Any>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    fn borrow_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    fn remove<T: Any>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|boxed| *boxed)
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Permanent attachments: storable, not droppable wholesale. Removal must
/// go through `remove::<T>` one type at a time; `destroy_empty` only
/// succeeds once every value has been explicitly removed.
#[derive(Default)]
pub struct PermanentArea(Option<Bag>);

impl PermanentArea {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn add<T: PermanentAreaValue>(&mut self, value: T) {
        self.0.get_or_insert_with(Bag::new).add(value);
    }

    pub fn contains<T: PermanentAreaValue>(&self) -> bool {
        self.0.as_ref().is_some_and(|bag| bag.contains::<T>())
    }

    pub fn borrow<T: PermanentAreaValue>(&self) -> Option<&T> {
        self.0.as_ref().and_then(|bag| bag.borrow::<T>())
    }

    pub fn borrow_mut<T: PermanentAreaValue>(&mut self) -> Option<&mut T> {
        self.0.as_mut().and_then(|bag| bag.borrow_mut::<T>())
    }

    pub fn remove<T: PermanentAreaValue>(&mut self) -> Option<T> {
        self.0.as_mut().and_then(|bag| bag.remove::<T>())
    }

    pub fn destroy_empty(&mut self) -> Result<(), String> {
        match &self.0 {
            Some(bag) if !bag.is_empty() => {
                Err("permanent area still holds values".to_string())
            }
            _ => {
                self.0 = None;
                Ok(())
            }
        }
    }
}

/// Transient attachments: both storable and droppable. The whole area is
/// thrown away on every transfer (`drop`), which is why the engine calls
/// this unconditionally from `spend_utxo`'s miss branch and
/// `handle_coinbase_tx`, rather than asking the caller to remove values
/// one type at a time.
#[derive(Default)]
pub struct TemporaryArea(Option<Bag>);

impl TemporaryArea {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn add<T: TemporaryAreaValue>(&mut self, value: T) {
        self.0.get_or_insert_with(Bag::new).add(value);
    }

    pub fn contains<T: TemporaryAreaValue>(&self) -> bool {
        self.0.as_ref().is_some_and(|bag| bag.contains::<T>())
    }

    pub fn borrow<T: TemporaryAreaValue>(&self) -> Option<&T> {
        self.0.as_ref().and_then(|bag| bag.borrow::<T>())
    }

    pub fn borrow_mut<T: TemporaryAreaValue>(&mut self) -> Option<&mut T> {
        self.0.as_mut().and_then(|bag| bag.borrow_mut::<T>())
    }

    pub fn remove<T: TemporaryAreaValue>(&mut self) -> Option<T> {
        self.0.as_mut().and_then(|bag| bag.remove::<T>())
    }

    pub fn drop_all(&mut self) {
        self.0 = None;
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_ref().map_or(true, |bag| bag.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Note(String);
    impl PermanentAreaValue for Note {}
    impl TemporaryAreaValue for Note {}

    #[test]
    fn permanent_area_round_trips_a_value() {
        let mut area = PermanentArea::new();
        area.add(Note("hello".into()));
        assert!(area.contains::<Note>());
        assert_eq!(area.borrow::<Note>(), Some(&Note("hello".into())));
        assert_eq!(area.remove::<Note>(), Some(Note("hello".into())));
        assert!(!area.contains::<Note>());
    }

    #[test]
    fn destroy_empty_fails_while_nonempty() {
        let mut area = PermanentArea::new();
        area.add(Note("x".into()));
        assert!(area.destroy_empty().is_err());
        area.remove::<Note>();
        assert!(area.destroy_empty().is_ok());
    }

    #[test]
    fn temporary_area_drops_everything_at_once() {
        let mut area = TemporaryArea::new();
        area.add(Note("x".into()));
        assert!(!area.is_empty());
        area.drop_all();
        assert!(area.is_empty());
        assert!(!area.contains::<Note>());
    }
}
