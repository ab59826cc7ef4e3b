//! Form controller: field values, validation state and guarded submission.

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use futures::future::join_all;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use crate::config::FormConfig;
use crate::debounce::TaskSlot;
use crate::error::{FormError, Result, ValidationErrors};
use crate::field::FieldDef;
use crate::state::{FieldMeta, FieldSnapshot, FormSnapshot};
use crate::validation::{first_error, AsyncValidator};

type Listener = Arc<dyn Fn(&FormSnapshot) + Send + Sync>;

/// Handle returned by [`FormController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
}

/// Result of a [`FormController::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    /// The form could not be submitted (errors, pending checks or a
    /// submission already in flight). The handler was not called.
    NotAllowed,
    /// Submit-time validation failed. The handler was not called.
    Invalid(ValidationErrors),
    /// The handler ran to completion.
    Completed(T),
    /// The handler failed or panicked. The failure was logged and swallowed.
    Failed(String),
}

/// Mutable state guarded by the controller's lock. Vectors are indexed
/// like the field definitions.
struct FormState {
    values: Vec<String>,
    meta: Vec<FieldMeta>,
    slots: Vec<TaskSlot>,
    is_submitting: bool,
    submission_attempts: u32,
}

impl FormState {
    fn can_submit(&self) -> bool {
        !self.meta.iter().any(FieldMeta::is_blocking)
    }
}

struct Inner {
    fields: Vec<FieldDef>,
    config: FormConfig,
    runtime: Handle,
    state: Mutex<FormState>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener: AtomicU64,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn snapshot(&self) -> FormSnapshot {
        let state = self.lock();
        FormSnapshot {
            fields: self
                .fields
                .iter()
                .zip(state.values.iter().zip(&state.meta))
                .map(|(def, (value, meta))| FieldSnapshot {
                    name: def.name.clone(),
                    value: value.clone(),
                    meta: meta.clone(),
                })
                .collect(),
            can_submit: state.can_submit(),
            is_submitting: state.is_submitting,
            submission_attempts: state.submission_attempts,
        }
    }

    /// Calls every listener with a fresh snapshot, outside of any lock.
    fn notify(&self) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Writes an async result if `generation` is still the field's live check.
    fn publish_async(&self, index: usize, generation: u64, result: std::result::Result<(), String>) {
        let name = &self.fields[index].name;
        let applied = {
            let mut state = self.lock();
            if state.slots[index].finish(generation) {
                let meta = &mut state.meta[index];
                meta.validating = false;
                meta.errors = result.err().into_iter().collect();
                true
            } else {
                false
            }
        };

        if applied {
            debug!(field = %name, generation, "async validation settled");
            self.notify();
        } else {
            debug!(field = %name, generation, "discarding superseded async validation");
        }
    }

    fn clear_submitting(&self) {
        self.lock().is_submitting = false;
        self.notify();
    }
}

/// Clears `is_submitting` however the submit future ends.
struct SubmittingGuard<'a> {
    inner: &'a Inner,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.inner.clear_submitting();
    }
}

/// Removes a listener when dropped.
struct ListenerGuard<'a> {
    controller: &'a FormController,
    subscription: Subscription,
}

impl Drop for ListenerGuard<'_> {
    fn drop(&mut self) {
        self.controller.unsubscribe(&self.subscription);
    }
}

async fn run_debounced(
    inner: Weak<Inner>,
    index: usize,
    generation: u64,
    validator: Arc<dyn AsyncValidator>,
    value: String,
    debounce: Duration,
) {
    if !debounce.is_zero() {
        tokio::time::sleep(debounce).await;
    }
    let result = validator.validate(&value).await;
    if let Some(inner) = inner.upgrade() {
        inner.publish_async(index, generation, result);
    }
}

/// Owns a form's values, per-field validation state and submission state.
///
/// The controller is a cheap handle; clones share the same form. It must be
/// created inside a Tokio runtime because async validators are spawned onto
/// it. State changes are published to subscribers as [`FormSnapshot`]s.
///
/// # Example
///
/// ```rust
/// use oxide_forms::{FieldDef, FormConfig, FormController};
/// use oxide_forms::validation::RequiredValidator;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> oxide_forms::Result<()> {
/// let form = FormController::new(
///     vec![FieldDef::new("lastName", "Last Name")
///         .validator(RequiredValidator::with_message("Last Name is required"))],
///     FormConfig::default(),
/// )?;
///
/// form.set_value("lastName", "")?;
/// assert_eq!(form.snapshot().errors("lastName"), ["Last Name is required"]);
/// assert!(!form.can_submit());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FormController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("fields", &self.inner.fields)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Creates a controller for the given fields.
    ///
    /// Fails when field names repeat or when no Tokio runtime is running.
    pub fn new(fields: Vec<FieldDef>, config: FormConfig) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
        }
        let runtime = Handle::try_current().map_err(|_| FormError::NoRuntime)?;

        let state = FormState {
            values: vec![String::new(); fields.len()],
            meta: vec![FieldMeta::default(); fields.len()],
            slots: fields.iter().map(|_| TaskSlot::new()).collect(),
            is_submitting: false,
            submission_attempts: 0,
        };

        Ok(Self {
            inner: Arc::new(Inner {
                fields,
                config,
                runtime,
                state: Mutex::new(state),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(1),
            }),
        })
    }

    /// Returns the field definitions.
    pub fn fields(&self) -> &[FieldDef] {
        &self.inner.fields
    }

    /// Returns the controller configuration.
    pub fn config(&self) -> &FormConfig {
        &self.inner.config
    }

    /// Sets a field's value and validates it.
    ///
    /// Synchronous validators run immediately. When they pass and the field
    /// has an async validator, a check is scheduled after the debounce
    /// window, replacing any check still pending for this field.
    pub fn set_value(&self, field: &str, value: impl Into<String>) -> Result<()> {
        let index = self.inner.index_of(field)?;
        let def = &self.inner.fields[index];
        let value = value.into();

        {
            let mut state = self.inner.lock();
            state.values[index].clone_from(&value);

            if let Some(message) = first_error(&def.validators, &value) {
                state.slots[index].cancel();
                let meta = &mut state.meta[index];
                meta.validating = false;
                meta.errors = vec![message];
            } else if let Some(validator) = &def.async_validator {
                let generation = state.slots[index].begin();
                let meta = &mut state.meta[index];
                meta.errors.clear();
                meta.validating = true;

                let debounce = def
                    .async_debounce
                    .unwrap_or_else(|| self.inner.config.debounce());
                debug!(field, generation, ?debounce, "scheduling async validation");
                let handle = self.inner.runtime.spawn(run_debounced(
                    Arc::downgrade(&self.inner),
                    index,
                    generation,
                    Arc::clone(validator),
                    value,
                    debounce,
                ));
                state.slots[index].attach(generation, handle);
            } else {
                state.slots[index].cancel();
                let meta = &mut state.meta[index];
                meta.validating = false;
                meta.errors.clear();
            }
        }

        self.inner.notify();
        Ok(())
    }

    /// Marks a field as touched. Does not validate.
    pub fn mark_touched(&self, field: &str) -> Result<()> {
        let index = self.inner.index_of(field)?;
        let changed = {
            let mut state = self.inner.lock();
            !std::mem::replace(&mut state.meta[index].touched, true)
        };
        if changed {
            self.inner.notify();
        }
        Ok(())
    }

    /// Blur binding: marks the field touched if its definition tracks blur.
    pub fn handle_blur(&self, field: &str) -> Result<()> {
        let index = self.inner.index_of(field)?;
        if self.inner.fields[index].touch_on_blur {
            self.mark_touched(field)
        } else {
            Ok(())
        }
    }

    /// Change binding: marks the field touched, then sets and validates the
    /// new value.
    pub fn handle_change(&self, field: &str, value: impl Into<String>) -> Result<()> {
        let index = self.inner.index_of(field)?;
        self.inner.lock().meta[index].touched = true;
        self.set_value(field, value)
    }

    /// Returns a field's current value.
    pub fn value(&self, field: &str) -> Result<String> {
        let index = self.inner.index_of(field)?;
        Ok(self.inner.lock().values[index].clone())
    }

    /// Returns all values keyed by field name.
    pub fn values(&self) -> HashMap<String, String> {
        let state = self.inner.lock();
        self.inner
            .fields
            .iter()
            .zip(&state.values)
            .map(|(def, value)| (def.name.clone(), value.clone()))
            .collect()
    }

    /// Returns a field's validation state.
    pub fn field_meta(&self, field: &str) -> Result<FieldMeta> {
        let index = self.inner.index_of(field)?;
        Ok(self.inner.lock().meta[index].clone())
    }

    /// True iff no field has errors and no async check is pending.
    pub fn can_submit(&self) -> bool {
        self.inner.lock().can_submit()
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.inner.lock().is_submitting
    }

    /// Returns the current state projection.
    pub fn snapshot(&self) -> FormSnapshot {
        self.inner.snapshot()
    }

    /// Registers a listener called with a snapshot after every state change.
    pub fn subscribe(
        &self,
        listener: impl Fn(&FormSnapshot) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        Subscription { id }
    }

    /// Removes a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription.id);
        listeners.len() != before
    }

    /// Waits until no field has an async check pending.
    pub async fn settled(&self) {
        let wake = Arc::new(Notify::new());
        let waker = Arc::clone(&wake);
        let _listener = ListenerGuard {
            controller: self,
            subscription: self.subscribe(move |_| waker.notify_one()),
        };
        while self.snapshot().is_validating() {
            wake.notified().await;
        }
    }

    /// Validates every field now, without debounce.
    ///
    /// Pending debounced checks are canceled; async validators of fields that
    /// pass their sync phase run concurrently. Returns the collected errors.
    pub async fn validate_all(&self) -> ValidationErrors {
        let mut pending = Vec::new();
        {
            let mut state = self.inner.lock();
            for (index, def) in self.inner.fields.iter().enumerate() {
                let value = state.values[index].clone();
                if let Some(message) = first_error(&def.validators, &value) {
                    state.slots[index].cancel();
                    let meta = &mut state.meta[index];
                    meta.validating = false;
                    meta.errors = vec![message];
                } else if let Some(validator) = &def.async_validator {
                    let generation = state.slots[index].begin();
                    let meta = &mut state.meta[index];
                    meta.errors.clear();
                    meta.validating = true;
                    pending.push((index, generation, Arc::clone(validator), value));
                } else {
                    state.slots[index].cancel();
                    let meta = &mut state.meta[index];
                    meta.validating = false;
                    meta.errors.clear();
                }
            }
        }
        self.inner.notify();

        let results = join_all(pending.into_iter().map(
            |(index, generation, validator, value)| async move {
                let result = validator.validate(&value).await;
                (index, generation, result)
            },
        ))
        .await;
        for (index, generation, result) in results {
            self.inner.publish_async(index, generation, result);
        }

        let state = self.inner.lock();
        let mut errors = ValidationErrors::new();
        for (def, meta) in self.inner.fields.iter().zip(&state.meta) {
            for message in &meta.errors {
                errors.add(&def.name, message.clone());
            }
        }
        errors
    }

    /// Submits the form through `on_submit`.
    ///
    /// A no-op returning [`SubmitOutcome::NotAllowed`] unless `can_submit`
    /// holds and no submission is in flight. Accepted submissions mark every
    /// field touched and, if configured, re-validate all fields before the
    /// handler runs. Handler errors and panics are logged and reported as
    /// [`SubmitOutcome::Failed`]. `is_submitting` is cleared when the attempt
    /// settles, even if this future is dropped.
    pub async fn submit<F, Fut, T, E>(&self, on_submit: F) -> SubmitOutcome<T>
    where
        F: FnOnce(HashMap<String, String>) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Display,
    {
        {
            let mut state = self.inner.lock();
            if state.is_submitting {
                debug!("submit ignored: a submission is already in flight");
                return SubmitOutcome::NotAllowed;
            }
            if !state.can_submit() {
                debug!("submit ignored: form has errors or pending validation");
                return SubmitOutcome::NotAllowed;
            }
            state.is_submitting = true;
            state.submission_attempts += 1;
            for meta in &mut state.meta {
                meta.touched = true;
            }
        }
        let _guard = SubmittingGuard { inner: &self.inner };
        self.inner.notify();

        if self.inner.config.validate_on_submit {
            let errors = self.validate_all().await;
            let still_validating = self.inner.lock().meta.iter().any(|m| m.validating);
            if !errors.is_empty() || still_validating {
                info!(fields = errors.len(), "submission blocked by validation");
                return SubmitOutcome::Invalid(errors);
            }
        }

        let values = self.values();
        let attempt = AssertUnwindSafe(async move { on_submit(values).await })
            .catch_unwind()
            .await;

        match attempt {
            Ok(Ok(output)) => SubmitOutcome::Completed(output),
            Ok(Err(e)) => {
                warn!(error = %e, "submission failed");
                SubmitOutcome::Failed(e.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(panic = %message, "submission handler panicked");
                SubmitOutcome::Failed(message)
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "submission handler panicked".to_string())
}
