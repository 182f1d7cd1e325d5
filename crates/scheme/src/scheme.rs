//! Type registry mapping group/version/kind identifiers to Rust types

use crate::error::{SchemeError, SchemeResult};
use crate::gvk::{GroupVersion, GroupVersionKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use tracing::debug;

type ErasedObject = Box<dyn Any + Send + Sync>;

/// A type that can be registered with a [`Scheme`].
///
/// The group and version come from the registration, the kind is a property
/// of the type itself.
pub trait Object: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    const KIND: &'static str;
}

/// Structural descriptor stored for every registered kind
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    gvk: GroupVersionKind,
    type_name: &'static str,
    type_id: TypeId,
    new_fn: fn() -> ErasedObject,
    decode_fn: fn(Value) -> Result<ErasedObject, serde_json::Error>,
}

fn new_erased<T: Object>() -> ErasedObject {
    Box::new(T::default())
}

fn decode_erased<T: Object>(value: Value) -> Result<ErasedObject, serde_json::Error> {
    Ok(Box::new(serde_json::from_value::<T>(value)?))
}

impl TypeDescriptor {
    fn of<T: Object>(gvk: GroupVersionKind) -> Self {
        Self {
            gvk,
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            new_fn: new_erased::<T>,
            decode_fn: decode_erased::<T>,
        }
    }

    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    /// Fully qualified Rust type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Object>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

/// An object decoded through the scheme whose concrete type is only known
/// at runtime
#[derive(Debug)]
pub struct DecodedObject {
    gvk: GroupVersionKind,
    object: ErasedObject,
}

impl DecodedObject {
    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    pub fn is<T: Object>(&self) -> bool {
        self.object.is::<T>()
    }

    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// Take the concrete object, handing `self` back if the type is wrong
    pub fn downcast<T: Object>(self) -> Result<T, Self> {
        let Self { gvk, object } = self;
        match object.downcast::<T>() {
            Ok(concrete) => Ok(*concrete),
            Err(object) => Err(Self { gvk, object }),
        }
    }
}

/// Write-once registry of known kinds.
///
/// Every kind maps to exactly one type and every type to exactly one kind.
/// Registering either a second time is an error, never an overwrite.
#[derive(Debug, Default)]
pub struct Scheme {
    kinds: HashMap<GroupVersionKind, TypeDescriptor>,
    types: HashMap<TypeId, GroupVersionKind>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `gv` with its own kind name
    pub fn add_known_type<T: Object>(&mut self, gv: &GroupVersion) -> SchemeResult<()> {
        let gvk = gv.with_kind(T::KIND);
        let type_name = std::any::type_name::<T>();

        if let Some(existing) = self.kinds.get(&gvk) {
            return Err(SchemeError::DuplicateKind {
                gvk,
                existing: existing.type_name,
                attempted: type_name,
            });
        }

        if let Some(registered) = self.types.get(&TypeId::of::<T>()) {
            return Err(SchemeError::DuplicateType {
                type_name,
                gvk: registered.clone(),
            });
        }

        debug!("Registering {} as {}", type_name, gvk);
        self.types.insert(TypeId::of::<T>(), gvk.clone());
        self.kinds.insert(gvk.clone(), TypeDescriptor::of::<T>(gvk));

        Ok(())
    }

    pub fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.kinds.contains_key(gvk)
    }

    pub fn descriptor(&self, gvk: &GroupVersionKind) -> Option<&TypeDescriptor> {
        self.kinds.get(gvk)
    }

    /// The kind `T` was registered as
    pub fn object_kind<T: Object>(&self) -> SchemeResult<&GroupVersionKind> {
        self.types
            .get(&TypeId::of::<T>())
            .ok_or(SchemeError::UnregisteredType(std::any::type_name::<T>()))
    }

    /// All registered kinds, sorted
    pub fn known_kinds(&self) -> Vec<&GroupVersionKind> {
        let mut kinds: Vec<_> = self.kinds.keys().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Create a default-valued instance of the type registered for `gvk`
    pub fn new_object(&self, gvk: &GroupVersionKind) -> SchemeResult<Box<dyn Any + Send + Sync>> {
        let descriptor = self
            .kinds
            .get(gvk)
            .ok_or_else(|| SchemeError::NotRegistered(gvk.clone()))?;
        Ok((descriptor.new_fn)())
    }

    /// Serialize `object`, stamping the `apiVersion` and `kind` it was
    /// registered with
    pub fn encode<T: Object>(&self, object: &T) -> SchemeResult<Value> {
        let gvk = self.object_kind::<T>()?;

        let mut value = serde_json::to_value(object).map_err(|source| SchemeError::Encode {
            gvk: gvk.clone(),
            source,
        })?;

        let fields = value.as_object_mut().ok_or(SchemeError::NotAnObject)?;
        fields.insert("apiVersion".to_string(), Value::String(gvk.api_version()));
        fields.insert("kind".to_string(), Value::String(gvk.kind.clone()));

        Ok(value)
    }

    /// Decode a document into whatever type its `apiVersion`/`kind` name
    pub fn decode(&self, value: Value) -> SchemeResult<DecodedObject> {
        let gvk = Self::type_meta(&value)?;

        let descriptor = self
            .kinds
            .get(&gvk)
            .ok_or_else(|| SchemeError::NotRegistered(gvk.clone()))?;

        let object = (descriptor.decode_fn)(value).map_err(|source| SchemeError::Decode {
            gvk: gvk.clone(),
            source,
        })?;

        Ok(DecodedObject { gvk, object })
    }

    /// Decode a document into `T`.
    ///
    /// A document without type information is taken to be a `T`; one that
    /// names a different kind is rejected.
    pub fn decode_into<T: Object>(&self, value: Value) -> SchemeResult<T> {
        let expected = self.object_kind::<T>()?;

        let has_type_meta = value.get("apiVersion").is_some() || value.get("kind").is_some();
        if has_type_meta {
            let found = Self::type_meta(&value)?;
            if &found != expected {
                return Err(SchemeError::KindMismatch {
                    expected: expected.clone(),
                    found,
                });
            }
        }

        serde_json::from_value(value).map_err(|source| SchemeError::Decode {
            gvk: expected.clone(),
            source,
        })
    }

    /// Read the group/version/kind a document claims to be
    pub fn type_meta(value: &Value) -> SchemeResult<GroupVersionKind> {
        let fields = value.as_object().ok_or(SchemeError::NotAnObject)?;

        let api_version = fields
            .get("apiVersion")
            .and_then(Value::as_str)
            .ok_or(SchemeError::MissingTypeMeta("apiVersion"))?;

        let kind = fields
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(SchemeError::MissingTypeMeta("kind"))?;

        GroupVersionKind::from_type_meta(api_version, kind)
    }
}
