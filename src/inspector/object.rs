use super::errors::InspectError;
use super::identity::identity_of;
use super::{AccessorErrorMode, Walker};
use crate::representation::Representation;
use crate::value::{Elements, Inspectable, ObjectRef, Value};
use indexmap::IndexMap;

/// Accessor name prefixes that mark a getter
const GETTER_PREFIXES: [&str; 3] = ["get", "is", "has"];

/// A virtual property slot before conversion
enum Property {
    Value(Value),
    Placeholder(Representation),
}

impl Walker<'_> {
    pub(super) fn convert_object(
        &mut self,
        object: &ObjectRef,
        depth: i32,
    ) -> Result<Representation, InspectError> {
        // The object takes one level, its member mapping another
        let members_depth = depth - 1;
        let value_depth = depth - 2;
        if value_depth < 0 {
            return Ok(Representation::MaxDepthReached);
        }

        let target = object.get();
        if let Some(elements) = target.elements() {
            return match elements {
                Elements::Keyed(entries) => self.convert_mapping(&entries, members_depth),
                Elements::Iter(iter) => {
                    self.convert_iterator(iter, target.type_name(), members_depth)
                }
            };
        }

        let identity = identity_of(object);
        if !self.context.visit(object, identity.clone()) {
            tracing::trace!(%identity, "recursion detected");
            return Ok(Representation::RecursionDetected(identity));
        }

        let properties = self.virtual_properties(target)?;
        let mut converted = IndexMap::with_capacity(properties.len());
        for (name, property) in properties {
            let repr = match property {
                Property::Value(value) => self.convert_value(&value, value_depth)?,
                Property::Placeholder(placeholder) => placeholder,
            };
            converted.insert(name, repr);
        }
        Ok(Representation::Mapping(converted))
    }

    /// Materialize a lazily produced sequence, stopping at the item cap
    fn convert_iterator<'a>(
        &mut self,
        iter: Box<dyn Iterator<Item = Value> + 'a>,
        type_name: &str,
        depth: i32,
    ) -> Result<Representation, InspectError> {
        let child_depth = depth - 1;
        let limit = self.max_iterable_items;
        let mut converted = Vec::new();
        for (index, item) in iter.enumerate() {
            if index == limit {
                tracing::warn!(type_name, limit, "iteration truncated");
                converted.push(Representation::Truncated(limit));
                break;
            }
            converted.push(self.convert_value(&item, child_depth)?);
        }
        Ok(Representation::Sequence(converted))
    }

    /// Collect getter values, honouring the filter policy
    fn virtual_properties(
        &self,
        target: &dyn Inspectable,
    ) -> Result<IndexMap<String, Property>, InspectError> {
        let type_name = target.type_name();
        let mut properties = IndexMap::new();

        for &accessor in target.accessors() {
            if self.policy.is_excluded(type_name, accessor) {
                tracing::trace!(type_name, accessor, "accessor skipped by policy");
                properties.insert(
                    accessor.to_string(),
                    Property::Placeholder(Representation::Skipped),
                );
                continue;
            }

            let Some(name) = property_name(accessor) else {
                continue;
            };
            // First getter for a property name wins
            if properties.contains_key(&name) {
                continue;
            }

            let property = match target.invoke(accessor) {
                Ok(value) => Property::Value(value),
                Err(source) => match self.accessor_errors {
                    AccessorErrorMode::Propagate => {
                        return Err(InspectError::AccessorFailed {
                            type_name: type_name.to_string(),
                            accessor: accessor.to_string(),
                            source,
                        });
                    }
                    AccessorErrorMode::Placeholder => {
                        tracing::warn!(type_name, accessor, error = %source, "accessor failed");
                        Property::Placeholder(Representation::AccessorFailed(source.message))
                    }
                },
            };
            properties.insert(name, property);
        }

        Ok(properties)
    }
}

/// Derive a virtual property name from a getter-style accessor
///
/// `getTitle` -> `title`, `is_active` -> `active`. Returns None for anything
/// else, including `hash` and a bare `get`.
pub(crate) fn property_name(accessor: &str) -> Option<String> {
    GETTER_PREFIXES.iter().find_map(|prefix| {
        let rest = accessor.strip_prefix(prefix)?;
        let rest = match rest.strip_prefix('_') {
            Some(snake) => snake,
            None if rest.starts_with(|c: char| c.is_uppercase()) => rest,
            None => return None,
        };
        let mut chars = rest.chars();
        let first = chars.next()?;
        Some(first.to_lowercase().chain(chars).collect())
    })
}
