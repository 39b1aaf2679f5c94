/*!

The dictionary (de)serialization form of §4.8/§6. [`Term::to_dict`](crate::api::term::Term::to_dict)
(declared alongside the term model, since it only needs `&self`) is the write side; [`from_dict`]
and [`dict_to_constructor_kwargs`] are the read side, and they need a process-scoped
[`VARIANT_REGISTRY`] mapping a serialized `(class_module, class_name)` pair back to the
constructor that knows how to build that kind of term from its fields.

The registry is a collaborator contract, not a core algorithm: every [`TermVariant`] a client
program defines is expected to [`register_variant`] itself (typically from a `ctor`-style
initializer) before any `from_dict` call that might need it.

*/

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::api::error::DeserializationError;
use crate::api::term::{KindTag, Term, TermVariant};

/// A registered variant's constructor: given the already-reconstructed children and the raw
/// field map (everything in the dict besides `class_module`, `class_name`, and `children`),
/// produce an initialized variant. Child-dependent fields present in the map (e.g. a serialized
/// `leaves`) are ignored by convention — they are recomputed by [`Term::new`], never read back.
pub type ConstructorFn = fn(&[Term], &JsonMap<String, JsonValue>) -> Result<Box<dyn TermVariant>, DeserializationError>;

static VARIANT_REGISTRY: Lazy<Mutex<HashMap<KindTag, ConstructorFn>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Register `ctor` as the constructor for `tag`. Re-registering a tag overwrites the previous
/// constructor; this is a process-scoped, read-mostly table (§5, "Shared-resource policy").
pub fn register_variant(tag: KindTag, ctor: ConstructorFn) {
    VARIANT_REGISTRY.lock().unwrap().insert(tag, ctor);
}

/// Split a serialized node into the children (already reconstructed into `Term`s) and the raw
/// field map a variant's constructor needs — the keyword-argument shape described in §4.8.
pub fn dict_to_constructor_kwargs(d: &JsonValue) -> Result<(Vec<Term>, JsonMap<String, JsonValue>), DeserializationError> {
    let obj = d.as_object().ok_or(DeserializationError::MalformedField("<root>"))?;

    let children = match obj.get("children") {
        Some(JsonValue::Array(items)) => items.iter().map(from_dict).collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(DeserializationError::MalformedField("children")),
        None => return Err(DeserializationError::MissingField("children")),
    };

    let mut fields = obj.clone();
    fields.remove("class_module");
    fields.remove("class_name");
    fields.remove("children");

    Ok((children, fields))
}

/// Reconstruct a `Term` from its dictionary form: look the kind tag up in the variant registry,
/// recursively reconstruct `children`, and hand the variant's constructor the field map to
/// extract its child-independent attributes from. Child-dependent attributes are recomputed by
/// [`Term::new`], not read from the dict.
pub fn from_dict(d: &JsonValue) -> Result<Term, DeserializationError> {
    let obj = d.as_object().ok_or(DeserializationError::MalformedField("<root>"))?;

    let class_module = obj
        .get("class_module")
        .and_then(JsonValue::as_str)
        .ok_or(DeserializationError::MissingField("class_module"))?;
    let class_name = obj
        .get("class_name")
        .and_then(JsonValue::as_str)
        .ok_or(DeserializationError::MissingField("class_name"))?;
    let tag = KindTag::new(class_module, class_name);

    let ctor = *VARIANT_REGISTRY
        .lock()
        .unwrap()
        .get(&tag)
        .ok_or_else(|| DeserializationError::UnknownKind(tag.clone()))?;

    let (children, fields) = dict_to_constructor_kwargs(d)?;
    let variant = ctor(&children, &fields)?;
    Ok(Term::new(children, variant))
}
