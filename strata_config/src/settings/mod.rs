//! Aggregation of typed settings from ordered value providers.
//!
//! The registry owns an ordered provider list and one instance per settings
//! type. Population runs every provider against every instance in
//! registration order, so later providers overwrite fields written by
//! earlier ones, mirroring the document-merge ordering philosophy.
//! Validation runs afterwards and skips disabled instances. Every phase is
//! fail-fast: the first error aborts the call.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{StrataError, StrataResult};
use crate::sections::SectionName;

mod cell;
mod coerce;
mod provider;

pub use cell::SettingsCell;
pub use provider::{EnvironmentProvider, SectionProvider, TableProvider, ValueProvider};

use cell::Slot;

/// A typed settings object the registry can populate and validate.
///
/// Implementors declare their section/pair name through [`SectionName`]
/// (usually via the derive) and may override the disabled flag and the
/// validation hook; both default to "enabled, always valid".
pub trait Settings: Default + Serialize + DeserializeOwned + SectionName + 'static {
    /// When `true`, the instance is exempt from validation. Its populated
    /// field values remain accessible either way.
    fn is_disabled(&self) -> bool {
        false
    }

    /// Post-population validation hook.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message describing why the populated values
    /// are unacceptable.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Ordered providers plus one instance per registered settings type.
#[derive(Default)]
pub struct SettingsRegistry {
    providers: Vec<Box<dyn ValueProvider>>,
    cells: Vec<Box<dyn SettingsCell>>,
}

impl core::fmt::Debug for SettingsRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SettingsRegistry")
            .field("providers", &self.providers.len())
            .field("cells", &self.cells.len())
            .finish()
    }
}

impl SettingsRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. Registration order is precedence order: later
    /// providers overwrite fields set by earlier ones.
    pub fn add_provider(&mut self, provider: impl ValueProvider + 'static) -> &mut Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Register a settings type, instantiated via [`Default`].
    ///
    /// Each type is held exactly once per registry lifetime; registering the
    /// same type again is a no-op for the instance, though providers still
    /// run against it on every population pass.
    pub fn add_settings<T: Settings>(&mut self) -> &mut Self {
        if !self.contains_settings::<T>() {
            self.cells.push(Box::new(Slot::new(T::default())));
        }
        self
    }

    /// Register a settings type through a fallible constructor.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Instantiation`] naming the settings type when
    /// the constructor reports failure.
    pub fn add_settings_with<T, F>(&mut self, constructor: F) -> StrataResult<&mut Self>
    where
        T: Settings,
        F: FnOnce() -> Result<T, String>,
    {
        if !self.contains_settings::<T>() {
            let instance =
                constructor().map_err(|detail| StrataError::instantiation(T::NAME, detail))?;
            self.cells.push(Box::new(Slot::new(instance)));
        }
        Ok(self)
    }

    /// Pre-configure an instance before (or between) population passes,
    /// registering the type first if needed.
    pub fn configure<T: Settings>(&mut self, apply: impl FnOnce(&mut T)) -> &mut Self {
        self.add_settings::<T>();
        if let Some(slot) = self
            .cells
            .iter_mut()
            .find_map(|cell| cell.as_any_mut().downcast_mut::<Slot<T>>())
        {
            apply(&mut slot.instance);
        }
        self
    }

    /// Run every provider, in registration order, against every instance.
    ///
    /// Safe to re-run; each pass simply re-applies the providers in order.
    ///
    /// # Errors
    ///
    /// Fails fast with the first provider error (coercion or section
    /// mismatch); instances after the failing one are not touched in this
    /// pass.
    pub fn populate(&mut self) -> StrataResult<&mut Self> {
        for cell in &mut self.cells {
            for provider in &self.providers {
                provider.populate(cell.as_mut())?;
            }
            tracing::debug!(
                settings = cell.name(),
                providers = self.providers.len(),
                "populated settings instance"
            );
        }
        Ok(self)
    }

    /// Validate every enabled instance, in registration order.
    ///
    /// # Errors
    ///
    /// Fails fast with [`StrataError::SettingsValidation`] naming the first
    /// offending type.
    pub fn validate(&self) -> StrataResult<()> {
        for cell in &self.cells {
            if cell.is_disabled() {
                tracing::debug!(settings = cell.name(), "skipping disabled settings");
                continue;
            }
            cell.validate()?;
        }
        Ok(())
    }

    /// Borrow the populated instance of `T`, if registered.
    #[must_use]
    pub fn get<T: Settings>(&self) -> Option<&T> {
        self.cells
            .iter()
            .find_map(|cell| cell.as_any().downcast_ref::<Slot<T>>())
            .map(|slot| &slot.instance)
    }

    /// Whether `T` is already registered.
    #[must_use]
    pub fn contains_settings<T: Settings>(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.as_any().downcast_ref::<Slot<T>>().is_some())
    }

    /// Names of all registered settings types, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|cell| cell.name())
    }

    /// Number of registered settings instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no settings types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
