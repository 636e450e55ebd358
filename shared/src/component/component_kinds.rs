use std::{any::TypeId, collections::HashMap};

use crate::component::{
    component_store::{AnyComponentStore, ComponentStore},
    replicate::Replicate,
};

/// Widest component set one registry may hold: the wire protocol's
/// components/changed masks are u16, one bit per registered kind.
pub const MAX_COMPONENT_KINDS: usize = 16;

/// Runtime identity of a registered component type
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ComponentKind(TypeId);

impl ComponentKind {
    pub fn of<C: Replicate>() -> Self {
        Self(TypeId::of::<C>())
    }
}

struct Registration {
    kind: ComponentKind,
    name: &'static str,
    make_store: fn(usize) -> Box<dyn AnyComponentStore>,
}

impl Clone for Registration {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name,
            make_store: self.make_store,
        }
    }
}

/// Registration-order table of component types.
///
/// The slot index a type gets here is the only identity it has on the wire:
/// both endpoints must register the same types in the same order. Built once
/// at startup and queried by `TypeId` afterwards — the per-tick path never
/// inspects types.
#[derive(Clone, Default)]
pub struct ComponentKinds {
    registrations: Vec<Registration>,
    kind_map: HashMap<ComponentKind, usize>,
}

impl ComponentKinds {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            kind_map: HashMap::new(),
        }
    }

    /// Register a component type. Registration order defines the type's wire
    /// slot index.
    ///
    /// # Panics
    ///
    /// Panics on duplicate registration or when the u16-mask limit of
    /// [`MAX_COMPONENT_KINDS`] types is exceeded — both are startup-time
    /// configuration mistakes.
    pub fn add_component<C: Replicate>(&mut self) {
        let kind = ComponentKind::of::<C>();
        let name = std::any::type_name::<C>();
        if self.kind_map.contains_key(&kind) {
            panic!("component type {name} is already registered");
        }
        if self.registrations.len() >= MAX_COMPONENT_KINDS {
            panic!("cannot register more than {MAX_COMPONENT_KINDS} component types");
        }
        self.kind_map.insert(kind, self.registrations.len());
        self.registrations.push(Registration {
            kind,
            name,
            make_store: |capacity| Box::new(ComponentStore::<C>::new(capacity)),
        });
    }

    /// Number of registered component types
    pub fn count(&self) -> usize {
        self.registrations.len()
    }

    pub fn index_of_kind(&self, kind: &ComponentKind) -> Option<usize> {
        self.kind_map.get(kind).copied()
    }

    /// Wire slot index of a registered type.
    ///
    /// # Panics
    ///
    /// Panics if the type was never registered — accessing an unregistered
    /// component through a store is a configuration error, not a runtime
    /// condition to recover from.
    pub fn index_of<C: Replicate>(&self) -> usize {
        let Some(index) = self.index_of_kind(&ComponentKind::of::<C>()) else {
            panic!(
                "component type {} is not registered",
                std::any::type_name::<C>()
            );
        };
        index
    }

    pub fn name_of(&self, index: usize) -> &'static str {
        self.registrations[index].name
    }

    pub fn kind_of(&self, index: usize) -> ComponentKind {
        self.registrations[index].kind
    }

    /// Build one empty typed store per registered kind, in registration order
    pub(crate) fn make_stores(&self, capacity: usize) -> Vec<Box<dyn AnyComponentStore>> {
        self.registrations
            .iter()
            .map(|registration| (registration.make_store)(capacity))
            .collect()
    }
}
