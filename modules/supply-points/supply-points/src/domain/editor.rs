//! Authenticated admin editor.
//!
//! All editor state lives in one [`AppState`] value owned by [`AdminEditor`]
//! and is only changed through the transition methods below. Every
//! collaborator call goes through a [`TaskScope`], so after [`AdminEditor::teardown`]
//! completions are dropped instead of applied.

use std::sync::Arc;

use supply_points_sdk::{
    Identity, QueueStatus, SupplyPoint, SupplyPointDraft, SupplyPointId, SupplyPointsClient,
    SupplyPointsError, WaterLevel,
};
use tracing::{debug, error, info, warn};

use crate::domain::gate::{GateView, IdentityGate};
use crate::domain::ports::{
    AuthError, GeocodeError, GeolocationError, Geolocator, IdentityProvider, Notification, Notifier,
    ReverseGeocoder,
};
use crate::domain::tasks::{TaskScope, TeardownHandle};

/// Texts shown to the editor.
pub mod messages {
    pub const SIGN_IN_FAILED: &str = "Sign-in failed";
    pub const ADDED: &str = "Added successfully";
    pub const UPDATED: &str = "Updated successfully";
    pub const SAVE_FAILED: &str = "Error while saving";
    pub const DELETED: &str = "Deleted successfully";
    pub const DELETE_FAILED: &str = "Error while deleting";
    pub const LOAD_FAILED: &str = "Failed to load supply points";
    pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation not supported";
    pub const GEOLOCATION_DENIED: &str = "Permission denied or location unavailable";
    pub const ADDRESS_LOOKUP_FAILED: &str = "Failed to fetch address";
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn(Identity),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    SignedOut,
    Adding,
    Editing(SupplyPointId),
}

/// Free-text form inputs. The two status fields are set through typed setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Location,
    OpenHours,
    PlusCode,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub session: Session,
    pub points: Vec<SupplyPoint>,
    pub form: SupplyPointDraft,
    pub selected_id: Option<SupplyPointId>,
    pub pending_delete: Option<SupplyPointId>,
}

impl AppState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match &self.session {
            Session::SignedOut => None,
            Session::SignedIn(identity) => Some(identity),
        }
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        match (&self.session, &self.selected_id) {
            (Session::SignedOut, _) => EditorMode::SignedOut,
            (Session::SignedIn(_), None) => EditorMode::Adding,
            (Session::SignedIn(_), Some(id)) => EditorMode::Editing(id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn(Identity),
    Failed(AuthError),
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    Loaded { points: usize, rejected: usize },
    Failed(SupplyPointsError),
    /// Nobody is signed in, so nothing was fetched.
    Skipped,
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(SupplyPointId),
    Updated(SupplyPointId),
    /// A required input is blank; nothing was sent.
    Incomplete(&'static str),
    Failed(SupplyPointsError),
    NotSignedIn,
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(SupplyPointId),
    Failed(SupplyPointsError),
    NothingPending,
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocateOutcome {
    /// The coordinate field now holds this text.
    Filled(String),
    Failed(GeolocationError),
    /// The position was found but the address lookup failed; the field is unchanged.
    LookupFailed(GeocodeError),
    NotSignedIn,
    Discarded,
}

/// Collaborators of the editor.
#[derive(Clone)]
pub struct EditorDeps {
    pub client: Arc<dyn SupplyPointsClient>,
    pub identity: Arc<dyn IdentityProvider>,
    pub geolocator: Arc<dyn Geolocator>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct AdminEditor {
    deps: EditorDeps,
    gate: IdentityGate,
    tasks: TaskScope,
    state: AppState,
}

impl AdminEditor {
    pub fn new(deps: EditorDeps) -> Self {
        let gate = IdentityGate::attach(deps.identity.as_ref());
        let session = match gate.view() {
            GateView::SignInPrompt => Session::SignedOut,
            GateView::Editor(identity) => Session::SignedIn(identity.clone()),
        };
        Self {
            deps,
            gate,
            tasks: TaskScope::new(),
            state: AppState {
                session,
                ..AppState::default()
            },
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> &GateView {
        self.gate.view()
    }

    #[must_use]
    pub fn form_title(&self) -> &'static str {
        if self.state.selected_id.is_some() {
            "Edit Supply Point"
        } else {
            "Add Supply Point"
        }
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.state.selected_id.is_some() {
            "Update"
        } else {
            "Add"
        }
    }

    /// `Hello, {first name}` for a signed-in editor with a display name.
    #[must_use]
    pub fn greeting(&self) -> Option<String> {
        let first = self.state.identity()?.first_name()?;
        Some(format!("Hello, {first}"))
    }

    #[must_use]
    pub fn teardown_handle(&self) -> TeardownHandle {
        self.tasks.handle()
    }

    /// Mount. Loads the list when a session is already active.
    pub async fn activate(&mut self) -> ReloadOutcome {
        self.reload().await
    }

    pub async fn sign_in(&mut self) -> SignInOutcome {
        let provider = self.deps.identity.clone();
        match self.tasks.run(async move { provider.sign_in().await }).await {
            None => SignInOutcome::Discarded,
            Some(Ok(identity)) => {
                info!(uid = %identity.uid, "Editor signed in");
                self.on_auth_changed(GateView::Editor(identity.clone()))
                    .await;
                SignInOutcome::SignedIn(identity)
            }
            Some(Err(e)) => {
                warn!(error = %e, "Sign-in failed");
                self.notify(Notification::error(messages::SIGN_IN_FAILED));
                SignInOutcome::Failed(e)
            }
        }
    }

    /// Returns `false` if the scope was torn down before sign-out finished.
    pub async fn sign_out(&mut self) -> bool {
        let provider = self.deps.identity.clone();
        if self
            .tasks
            .run(async move { provider.sign_out().await })
            .await
            .is_none()
        {
            return false;
        }
        self.on_auth_changed(GateView::SignInPrompt).await;
        true
    }

    /// Apply an auth transition. Re-reporting the current session is a no-op.
    pub async fn on_auth_changed(&mut self, view: GateView) {
        if self.tasks.is_torn_down() {
            return;
        }
        self.gate.set_view(view.clone());
        match view {
            GateView::SignInPrompt => {
                if self.state.session != Session::SignedOut {
                    info!("Editor signed out, clearing state");
                }
                self.state = AppState::default();
            }
            GateView::Editor(identity) => {
                let session = Session::SignedIn(identity);
                if self.state.session == session {
                    return;
                }
                self.state = AppState {
                    session,
                    ..AppState::default()
                };
                self.reload().await;
            }
        }
    }

    /// Wait for the provider to report a transition and apply it.
    ///
    /// Returns `false` once the subscription has ended or the editor was torn down.
    pub async fn next_auth_change(&mut self) -> bool {
        let view = tokio::select! {
            biased;
            () = self.tasks.torn_down() => None,
            view = self.gate.changed() => view,
        };
        match view {
            Some(view) => {
                self.on_auth_changed(view).await;
                true
            }
            None => {
                self.gate.release();
                false
            }
        }
    }

    /// Replace the in-memory list with a fresh full read.
    pub async fn reload(&mut self) -> ReloadOutcome {
        if self.state.identity().is_none() {
            return ReloadOutcome::Skipped;
        }
        let client = self.deps.client.clone();
        match self.tasks.run(async move { client.list_points().await }).await {
            None => ReloadOutcome::Discarded,
            Some(Ok(snapshot)) => {
                if !snapshot.rejected.is_empty() {
                    warn!(rejected = ?snapshot.rejected, "Some documents were left out of the list");
                }
                let outcome = ReloadOutcome::Loaded {
                    points: snapshot.points.len(),
                    rejected: snapshot.rejected.len(),
                };
                self.state.points = snapshot.points;
                debug!(points = self.state.points.len(), "Editor list reloaded");
                outcome
            }
            Some(Err(e)) => {
                warn!(error = %e, "Failed to load supply points, keeping previous list");
                self.notify(Notification::error(messages::LOAD_FAILED));
                ReloadOutcome::Failed(e)
            }
        }
    }

    /// Fill the form from the in-memory copy of `id`. No fetch happens.
    pub fn load_for_edit(&mut self, id: &SupplyPointId) -> bool {
        if self.state.identity().is_none() {
            return false;
        }
        let Some(point) = self.state.points.iter().find(|p| &p.id == id) else {
            debug!(id = %id, "Point to edit is not in the current list");
            return false;
        };
        self.state.form = point.to_draft();
        self.state.selected_id = Some(id.clone());
        true
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let form = &mut self.state.form;
        match field {
            FormField::Name => form.name = value,
            FormField::Location => form.location = value,
            FormField::OpenHours => form.open_hours = value,
            FormField::PlusCode => form.plus_code = value,
        }
    }

    pub fn set_water_level(&mut self, level: WaterLevel) {
        self.state.form.water_level = level;
    }

    pub fn set_queue_status(&mut self, status: QueueStatus) {
        self.state.form.queue_status = status;
    }

    /// Blank the form and drop the selection.
    pub fn cancel_edit(&mut self) {
        self.state.form = SupplyPointDraft::default();
        self.state.selected_id = None;
    }

    /// Create when nothing is selected, otherwise overwrite the selected point.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(identity) = self.state.identity().cloned() else {
            return SubmitOutcome::NotSignedIn;
        };
        if let Some(field) = self.blank_required_field() {
            return SubmitOutcome::Incomplete(field);
        }

        let client = self.deps.client.clone();
        let draft = self.state.form.clone();
        let selected = self.state.selected_id.clone();
        let updating = selected.is_some();
        let result = self
            .tasks
            .run(async move {
                match selected {
                    Some(id) => client.replace_point(&identity, &id, draft).await,
                    None => client.create_point(&identity, draft).await,
                }
            })
            .await;

        match result {
            None => SubmitOutcome::Discarded,
            Some(Ok(point)) => {
                let message = if updating {
                    messages::UPDATED
                } else {
                    messages::ADDED
                };
                self.notify(Notification::success(message));
                self.cancel_edit();
                self.reload().await;
                if updating {
                    SubmitOutcome::Updated(point.id)
                } else {
                    SubmitOutcome::Created(point.id)
                }
            }
            Some(Err(e)) => {
                error!(error = %e, updating, "Failed to save supply point");
                self.notify(Notification::error(messages::SAVE_FAILED));
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// First phase of a delete: remember the id, touch nothing.
    pub fn request_delete(&mut self, id: SupplyPointId) {
        if self.state.identity().is_some() {
            self.state.pending_delete = Some(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.state.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.state.pending_delete.clone() else {
            return DeleteOutcome::NothingPending;
        };
        let client = self.deps.client.clone();
        let target = id.clone();
        match self
            .tasks
            .run(async move { client.delete_point(&target).await })
            .await
        {
            None => DeleteOutcome::Discarded,
            Some(Ok(())) => {
                self.notify(Notification::success(messages::DELETED));
                self.state.pending_delete = None;
                if self.state.selected_id.as_ref() == Some(&id) {
                    self.cancel_edit();
                }
                self.reload().await;
                DeleteOutcome::Deleted(id)
            }
            Some(Err(e)) => {
                error!(error = %e, id = %id, "Failed to delete supply point");
                self.notify(Notification::error(messages::DELETE_FAILED));
                DeleteOutcome::Failed(e)
            }
        }
    }

    /// Fill the coordinate field from the device position.
    ///
    /// The address lookup must succeed before the field is written, but the
    /// field receives the raw coordinates, never the address.
    pub async fn geolocate(&mut self) -> GeolocateOutcome {
        if self.state.identity().is_none() {
            return GeolocateOutcome::NotSignedIn;
        }
        let geolocator = self.deps.geolocator.clone();
        let position = match self
            .tasks
            .run(async move { geolocator.current_position().await })
            .await
        {
            None => return GeolocateOutcome::Discarded,
            Some(Ok(position)) => position,
            Some(Err(e)) => {
                warn!(error = %e, "Geolocation failed");
                let message = match e {
                    GeolocationError::Unsupported => messages::GEOLOCATION_UNSUPPORTED,
                    GeolocationError::PermissionDenied | GeolocationError::Unavailable(_) => {
                        messages::GEOLOCATION_DENIED
                    }
                };
                self.notify(Notification::error(message));
                return GeolocateOutcome::Failed(e);
            }
        };

        let geocoder = self.deps.geocoder.clone();
        match self
            .tasks
            .run(async move { geocoder.reverse(position).await })
            .await
        {
            None => return GeolocateOutcome::Discarded,
            Some(Ok(address)) => debug!(%address, "Reverse geocoded position"),
            Some(Err(e)) => {
                warn!(error = %e, "Reverse geocoding failed");
                self.notify(Notification::error(messages::ADDRESS_LOOKUP_FAILED));
                return GeolocateOutcome::LookupFailed(e);
            }
        }

        let coords = position.to_plus_code();
        self.state.form.plus_code.clone_from(&coords);
        GeolocateOutcome::Filled(coords)
    }

    /// Stop applying completions and release the auth subscription.
    pub fn teardown(&mut self) {
        self.tasks.teardown();
        self.gate.release();
        debug!("Admin editor torn down");
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.tasks.is_torn_down()
    }

    fn blank_required_field(&self) -> Option<&'static str> {
        use supply_points_sdk::DocFields;
        let form = &self.state.form;
        [
            (DocFields::NAME, &form.name),
            (DocFields::LOCATION, &form.location),
            (DocFields::OPEN_HOURS, &form.open_hours),
            (DocFields::PLUS_CODE, &form.plus_code),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    fn notify(&self, notification: Notification) {
        if !self.tasks.is_torn_down() {
            self.deps.notifier.notify(notification);
        }
    }
}
