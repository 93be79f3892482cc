//! Type-erased storage for settings instances.
//!
//! The registry holds each instance behind the object-safe [`SettingsCell`]
//! trait; the typed [`Slot`] implements it by driving all field access
//! through serde, so the instance's declared schema is the only source of
//! field names and types.

use std::any::Any;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::{StrataError, StrataResult};
use crate::manager::ConfigManager;
use crate::merge::merge_value;

use super::Settings;
use super::coerce::{coerce, shape_name};

/// Object-safe view of one stored settings instance.
///
/// Implemented by the registry's internal slots; value providers receive
/// `&mut dyn SettingsCell` and choose between the key-value path
/// ([`SettingsCell::apply_pairs`]) and the section-bridge path
/// ([`SettingsCell::apply_section`]).
pub trait SettingsCell {
    /// The settings name, used as key-pair prefix and section name.
    fn name(&self) -> &'static str;

    /// Apply matching `<name>.<field>` pairs, coercing values toward each
    /// field's declared shape.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::FieldCoercion`] naming the first field whose
    /// value the instance's schema rejects.
    fn apply_pairs(&mut self, pairs: &BTreeMap<String, String>) -> StrataResult<()>;

    /// Merge the section named after this settings type over the instance,
    /// if the active environment defines it.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::SectionTypeMismatch`] when the section's JSON
    /// cannot populate the instance.
    fn apply_section(&mut self, manager: &ConfigManager) -> StrataResult<()>;

    /// Whether this instance opted out of validation.
    fn is_disabled(&self) -> bool;

    /// Run the instance's validation hook.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::SettingsValidation`] naming this settings type.
    fn validate(&self) -> StrataResult<()>;

    /// Borrow the slot as [`Any`] for typed downcasts.
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow the slot as [`Any`] for typed downcasts.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Typed slot holding one settings instance.
pub(super) struct Slot<T: Settings> {
    pub(super) instance: T,
}

impl<T: Settings> Slot<T> {
    pub(super) const fn new(instance: T) -> Self {
        Self { instance }
    }

    fn serialized(&self) -> StrataResult<Value> {
        serde_json::to_value(&self.instance).map_err(|e| {
            StrataError::instantiation(T::NAME, format!("settings did not serialize: {e}"))
        })
    }
}

impl<T: Settings> SettingsCell for Slot<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn apply_pairs(&mut self, pairs: &BTreeMap<String, String>) -> StrataResult<()> {
        let mut current = self.serialized()?;
        // Non-object settings have no named fields to match.
        let Some(fields) = current.as_object() else {
            return Ok(());
        };
        let field_names: Vec<String> = fields.keys().cloned().collect();

        for field in field_names {
            let Some(raw) = pairs.get(&format!("{}.{field}", T::NAME)) else {
                continue;
            };
            let (coerced, target) = match current.get(&field) {
                Some(shape) => (coerce(raw, shape), shape_name(shape)),
                None => (Value::String(raw.clone()), "string"),
            };
            let mut candidate = current.clone();
            if let Some(map) = candidate.as_object_mut() {
                map.insert(field.clone(), coerced);
            }
            match serde_json::from_value::<T>(candidate.clone()) {
                Ok(updated) => {
                    current = candidate;
                    self.instance = updated;
                }
                Err(source) => {
                    return Err(StrataError::field_coercion(T::NAME, field, raw, target, source));
                }
            }
        }
        Ok(())
    }

    fn apply_section(&mut self, manager: &ConfigManager) -> StrataResult<()> {
        let Some(overlay) = manager.section_value(T::NAME) else {
            return Ok(());
        };
        let mut merged = self.serialized()?;
        merge_value(&mut merged, overlay.clone());
        self.instance = serde_json::from_value(merged)
            .map_err(|e| StrataError::section_type_mismatch(T::NAME, e))?;
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.instance.is_disabled()
    }

    fn validate(&self) -> StrataResult<()> {
        self.instance
            .validate()
            .map_err(|message| StrataError::settings_validation(T::NAME, message))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
