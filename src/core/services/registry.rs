//=========================================================================
// Service Registry
//=========================================================================
//
// Type-keyed table of long-lived services.
//
// Architecture:
//   place_in_context<T>() → context: HashMap<TypeId, Slot>
//                               ↓ settle_context() / adoption on lookup
//   register<T>()       → persistent: HashMap<TypeId, Slot>
//                               ↓
//   instance<T>()       ← find-or-create, always the same slot
//
// Invariant: at most one persistent instance per service type. The first
// registration wins, later ones are retired on the spot.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::error::ServiceError;

//=== Service Trait =======================================================

/// A long-lived object providing one cohesive capability.
///
/// `Default` is the construction used when a service is first looked up
/// and nobody registered one beforehand.
pub trait Service: Default + Send + 'static {
    /// Human-readable name used in diagnostics.
    const NAME: &'static str;
}

//=== Registration ========================================================

/// Outcome of handing a service object to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The object became the persistent instance.
    Registered,

    /// The object was placed into the active context and awaits adoption.
    Placed,

    /// An instance already existed; the new object was dropped.
    DuplicateDiscarded,
}

impl Registration {
    /// Returns true unless the object was discarded.
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::DuplicateDiscarded)
    }
}

//=== Slot ================================================================

struct Slot {
    name: &'static str,
    value: Box<dyn Any + Send>,
}

impl Slot {
    fn new<T: Service>(service: T) -> Self {
        Self {
            name: T::NAME,
            value: Box::new(service),
        }
    }
}

//=== ServiceRegistry =====================================================

/// Process-wide access point for services.
///
/// Owned by the engine's [`GlobalContext`](crate::core::GlobalContext) and
/// reached by scenes through `context.services`. Persistent services
/// survive every scene transition; objects placed into the active context
/// are dropped with the scene unless something adopts them first.
pub struct ServiceRegistry {
    persistent: HashMap<TypeId, Slot>,
    context: HashMap<TypeId, Slot>,
}

impl ServiceRegistry {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            persistent: HashMap::new(),
            context: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers `service` as the persistent instance of `T`.
    ///
    /// If an instance already exists it is kept and `service` is dropped.
    pub fn register<T: Service>(&mut self, service: T) -> Registration {
        match self.persistent.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => {
                warn!(target: "services", "{} already registered, discarding duplicate", T::NAME);
                Registration::DuplicateDiscarded
            }
            Entry::Vacant(slot) => {
                info!(target: "services", "Registered {}", T::NAME);
                slot.insert(Slot::new(service));
                Registration::Registered
            }
        }
    }

    /// Places `service` into the active context.
    ///
    /// This models a service object that lives in a scene. It is promoted
    /// on [`settle_context`](Self::settle_context) or adopted by the first
    /// [`instance`](Self::instance) lookup, whichever comes first.
    pub fn place_in_context<T: Service>(&mut self, service: T) -> Registration {
        let type_id = TypeId::of::<T>();

        if self.persistent.contains_key(&type_id) {
            warn!(target: "services", "{} already registered, retiring scene copy", T::NAME);
            return Registration::DuplicateDiscarded;
        }

        match self.context.entry(type_id) {
            Entry::Occupied(_) => {
                warn!(target: "services", "{} already placed in context, discarding duplicate", T::NAME);
                Registration::DuplicateDiscarded
            }
            Entry::Vacant(slot) => {
                debug!(target: "services", "Placed {} in active context", T::NAME);
                slot.insert(Slot::new(service));
                Registration::Placed
            }
        }
    }

    //--- Access Point -----------------------------------------------------

    /// Returns the single instance of `T`, creating it if needed.
    ///
    /// Resolution order:
    /// 1. the persistent instance, if present
    /// 2. an object of type `T` placed into the active context (adopted)
    /// 3. a fresh `T::default()`
    pub fn instance<T: Service>(&mut self) -> &mut T {
        let type_id = TypeId::of::<T>();

        let slot = match self.persistent.entry(type_id) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(vacant) => {
                let slot = match self.context.remove(&type_id) {
                    Some(placed) => {
                        info!(target: "services", "Adopted {} from active context", T::NAME);
                        placed
                    }
                    None => {
                        info!(target: "services", "Created {} on first access", T::NAME);
                        Slot::new(T::default())
                    }
                };
                vacant.insert(slot)
            }
        };

        slot.value
            .downcast_mut::<T>()
            .expect("Type mismatch in ServiceRegistry slot")
    }

    /// Returns the persistent instance of `T` without creating one.
    pub fn get<T: Service>(&self) -> Option<&T> {
        self.persistent
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_ref::<T>())
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut<T: Service>(&mut self) -> Option<&mut T> {
        self.persistent
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_mut::<T>())
    }

    /// Returns the persistent instance of `T` or a typed error.
    pub fn require<T: Service>(&self) -> Result<&T, ServiceError> {
        self.get::<T>().ok_or(ServiceError::Missing(T::NAME))
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if a persistent instance of `T` exists.
    pub fn contains<T: Service>(&self) -> bool {
        self.persistent.contains_key(&TypeId::of::<T>())
    }

    /// Number of persistent services.
    pub fn len(&self) -> usize {
        self.persistent.len()
    }

    /// Returns true if no persistent service exists.
    pub fn is_empty(&self) -> bool {
        self.persistent.is_empty()
    }

    /// Number of objects waiting in the active context.
    pub fn context_len(&self) -> usize {
        self.context.len()
    }

    //--- Context Lifecycle ------------------------------------------------

    /// Promotes every object placed into the active context.
    ///
    /// Called by the scene manager once a scene has entered. Objects whose
    /// type already has a persistent instance are retired. Returns the
    /// number of promoted services.
    pub fn settle_context(&mut self) -> usize {
        let mut promoted = 0;

        for (type_id, slot) in self.context.drain() {
            match self.persistent.entry(type_id) {
                Entry::Occupied(_) => {
                    warn!(target: "services", "{} already registered, retiring scene copy", slot.name);
                }
                Entry::Vacant(vacant) => {
                    info!(target: "services", "Promoted {} to persistent service", slot.name);
                    vacant.insert(slot);
                    promoted += 1;
                }
            }
        }

        promoted
    }

    /// Drops every object still placed in the outgoing context.
    ///
    /// Persistent services are untouched. Returns the number of dropped
    /// objects.
    pub fn clear_context(&mut self) -> usize {
        let dropped = self.context.len();
        for slot in self.context.values() {
            debug!(target: "services", "Dropping unadopted {} with its scene", slot.name);
        }
        self.context.clear();
        dropped
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
