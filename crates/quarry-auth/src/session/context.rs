//! The single-writer session context.
//!
//! [`SessionContext`] is the only component that mutates the bearer token
//! and the session state. Every other component reads a
//! [`SessionSnapshot`] or subscribes to [`DomainEvent`]s.
//!
//! Each change of token (login, company switch, logout) starts a new
//! *epoch*. Responses are applied only if the epoch they were issued in is
//! still current, and in-flight collection fetches of an ended epoch are
//! cancelled. A slow permission fetch for a previous company therefore can
//! never overwrite the permissions of the current one.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use quarry_client::ApiClient;
use quarry_client::dto::request::validate_request;
use quarry_client::dto::{LoginRequest, MeResponse, RegisterRequest, SwitchCompanyRequest};
use quarry_core::config::SessionConfig;
use quarry_core::events::{DomainEvent, LogoutReason, SessionEvent};
use quarry_core::{AccessToken, ActionResult, AppError, AppResult, CompanyId, UserId};
use quarry_entity::company::Company;
use quarry_entity::permission::{Action, PermissionMap, Resource};
use quarry_entity::session::{SessionSnapshot, SessionState};

use crate::access::navigation::{self, DashboardWidget, NavItem};
use crate::access::{PermissionGate, Requirement};
use crate::token::TokenStore;

use super::submission::{Submission, SubmissionGuard};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const SWITCH_FAILED: &str = "Failed to switch company";
const IN_PROGRESS: &str = "Request already in progress";
const SWITCH_SUPERSEDED: &str = "Company switch superseded";
const NOT_LOGGED_IN: &str = "Not logged in";
const COMPANY_UNAVAILABLE: &str = "Company is not available to this user";

/// Mutable state behind the context's lock.
#[derive(Debug)]
struct Inner {
    /// What consumers see.
    snapshot: SessionSnapshot,
    /// Current bearer token; `Some` whenever a user is set.
    token: Option<AccessToken>,
    /// Incremented on every token change.
    epoch: u64,
    /// Cancelled when the epoch ends.
    scope: CancellationToken,
}

impl Inner {
    /// End the current epoch, cancelling its in-flight requests.
    fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.scope.cancel();
        self.scope = CancellationToken::new();
        self.epoch
    }

    fn active_company_id(&self) -> Option<CompanyId> {
        self.snapshot.active_company.as_ref().map(|c| c.id.clone())
    }

    fn actor(&self) -> Option<UserId> {
        self.snapshot.user.as_ref().map(|u| u.id.clone())
    }

    fn reset(&mut self) {
        self.next_epoch();
        self.token = None;
        self.snapshot = SessionSnapshot {
            state: SessionState::Anonymous,
            loading: false,
            ..SessionSnapshot::default()
        };
    }
}

/// Keeps the active company inside the available list.
fn ensure_membership(snapshot: &mut SessionSnapshot) {
    let Some(active) = snapshot.active_company.as_ref() else {
        return;
    };
    if !snapshot.companies.iter().any(|c| c.id == active.id) {
        warn!(
            company_id = %active.id,
            "Active company missing from available companies; adding it"
        );
        snapshot.companies.insert(0, active.clone());
    }
}

/// Owns the session: user, active company, companies, permissions, token.
pub struct SessionContext {
    /// Backend seam.
    api: Arc<dyn ApiClient>,
    /// Persisted token.
    tokens: Arc<dyn TokenStore>,
    /// Session state.
    inner: RwLock<Inner>,
    /// Session event fan-out.
    events: broadcast::Sender<DomainEvent>,
    /// Duplicate-submission guard.
    submissions: SubmissionGuard,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SessionContext")
            .field("state", &inner.snapshot.state)
            .field("epoch", &inner.epoch)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Creates an uninitialized context. Call [`bootstrap`](Self::bootstrap)
    /// once at startup.
    pub fn new(
        api: Arc<dyn ApiClient>,
        tokens: Arc<dyn TokenStore>,
        config: &SessionConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer.max(1));
        Self {
            api,
            tokens,
            inner: RwLock::new(Inner {
                snapshot: SessionSnapshot {
                    loading: true,
                    ..SessionSnapshot::default()
                },
                token: None,
                epoch: 0,
                scope: CancellationToken::new(),
            }),
            events,
            submissions: SubmissionGuard::new(),
        }
    }

    // ── Read side ────────────────────────────────────────────────

    /// Current state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().snapshot.clone()
    }

    /// True until startup validation resolves.
    pub fn is_loading(&self) -> bool {
        self.inner.read().snapshot.loading
    }

    /// Whether a bearer token is held.
    pub fn has_token(&self) -> bool {
        self.inner.read().token.is_some()
    }

    /// Whether `action` on `resource` is granted in the active company.
    pub fn can(&self, resource: Resource, action: Action) -> bool {
        self.inner.read().snapshot.can(resource, action)
    }

    /// Sidebar entries for the active company.
    pub fn navigation(&self) -> Vec<NavItem> {
        let inner = self.inner.read();
        if !inner.snapshot.is_authenticated() {
            return Vec::new();
        }
        navigation::visible_menu(&inner.snapshot.permissions)
    }

    /// Dashboard widgets for the active company.
    pub fn dashboard_widgets(&self) -> Vec<DashboardWidget> {
        let inner = self.inner.read();
        if !inner.snapshot.is_authenticated() {
            return Vec::new();
        }
        navigation::visible_widgets(&inner.snapshot.permissions)
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Validate a persisted token at startup.
    ///
    /// Never fails: any problem degrades to an anonymous session and the
    /// persisted token is removed. `loading` becomes false when the attempt
    /// resolves. Later calls return the current snapshot unchanged.
    pub async fn bootstrap(&self) -> SessionSnapshot {
        let epoch = {
            let mut inner = self.inner.write();
            if inner.snapshot.state != SessionState::Uninitialized {
                debug!("Session already bootstrapped");
                return inner.snapshot.clone();
            }
            inner.snapshot.state = SessionState::Loading;
            inner.snapshot.loading = true;
            inner.epoch
        };

        let persisted = match self.tokens.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token");
                None
            }
        };

        let authenticated = match persisted {
            None => {
                debug!("No persisted token; starting logged out");
                false
            }
            Some(token) => match self.load_identity(&token).await {
                Ok((me, companies)) => self.adopt_bootstrap(epoch, token, me, companies),
                Err(e) => {
                    info!(error = %e, "Persisted token rejected; starting logged out");
                    self.discard_persisted_token(epoch);
                    false
                }
            },
        };

        let (snapshot, actor) = {
            let mut inner = self.inner.write();
            if inner.snapshot.state == SessionState::Loading {
                inner.snapshot.state = SessionState::Anonymous;
            }
            inner.snapshot.loading = false;
            (inner.snapshot.clone(), inner.actor())
        };

        self.emit(actor, SessionEvent::Bootstrapped { authenticated });
        snapshot
    }

    /// Exchange credentials for a session.
    ///
    /// The token is persisted before the dependent identity and company
    /// fetches are issued. If either fetch fails the session stays logged in
    /// with whatever did load, but the result reports the failure.
    pub async fn login(&self, username: &str, password: &str) -> ActionResult {
        let Some(_in_flight) = self.submissions.try_begin(Submission::Login) else {
            return ActionResult::failure(IN_PROGRESS);
        };

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        if let Err(e) = validate_request(&request) {
            return ActionResult::failure(e.message);
        }

        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(username = %request.username, error = %e, "Login rejected");
                return ActionResult::from_error(&e, LOGIN_FAILED);
            }
        };

        let token = response.access_token;
        let epoch = {
            let mut inner = self.inner.write();
            if let Err(e) = self.tokens.save(&token) {
                error!(error = %e, "Failed to persist access token");
                return ActionResult::failure(LOGIN_FAILED);
            }
            let epoch = inner.next_epoch();
            // A bootstrap still in flight owns the loading flag.
            let loading = inner.snapshot.state == SessionState::Loading;
            inner.token = Some(token.clone());
            inner.snapshot = SessionSnapshot {
                state: SessionState::Authenticated {
                    company: response.company.as_ref().map(|c| c.id.clone()),
                },
                user: response.user,
                companies: response.company.iter().cloned().collect(),
                active_company: response.company,
                permissions: PermissionMap::new(),
                role: None,
                loading,
            };
            epoch
        };

        let mut incomplete: Option<AppError> = None;
        let issued_for = self.inner.read().active_company_id();
        match self.api.me(&token).await {
            Ok(me) => {
                self.apply_identity(epoch, issued_for, me);
            }
            Err(e) => {
                warn!(error = %e, "Permissions unavailable after login; menu will be empty");
                if e.is_auth_expired() {
                    self.expire_token(&token);
                }
                incomplete = Some(e);
            }
        }

        match self.api.companies(&token).await {
            Ok(companies) => {
                self.apply_companies(epoch, companies);
            }
            Err(e) => {
                warn!(error = %e, "Company list unavailable after login");
                incomplete.get_or_insert(e);
            }
        }

        let outcome = {
            let mut inner = self.inner.write();
            if inner.epoch != epoch {
                Err("Session changed during login")
            } else if inner.snapshot.user.is_none() {
                if let Err(e) = self.tokens.clear() {
                    warn!(error = %e, "Failed to remove persisted token");
                }
                inner.reset();
                Err("Backend did not identify the user")
            } else {
                Ok((inner.actor(), inner.active_company_id()))
            }
        };

        match outcome {
            Ok((Some(user_id), company_id)) => {
                info!(user_id = %user_id, company_id = ?company_id, "Login successful");
                self.emit(
                    Some(user_id.clone()),
                    SessionEvent::LoggedIn {
                        user_id,
                        company_id,
                    },
                );
                match incomplete {
                    Some(e) => ActionResult::from_error(&e, LOGIN_FAILED),
                    None => ActionResult::Success,
                }
            }
            Ok((None, _)) => ActionResult::failure(LOGIN_FAILED),
            Err(reason) => {
                warn!(reason, "Login abandoned");
                ActionResult::failure(LOGIN_FAILED)
            }
        }
    }

    /// Create a user account. Does not log the new user in.
    pub async fn register(&self, request: RegisterRequest) -> ActionResult {
        let Some(_in_flight) = self.submissions.try_begin(Submission::Register) else {
            return ActionResult::failure(IN_PROGRESS);
        };

        if let Err(e) = validate_request(&request) {
            return ActionResult::failure(e.message);
        }

        match self.api.register(&request).await {
            Ok(()) => {
                info!(username = %request.username, "User registered");
                ActionResult::Success
            }
            Err(e) => {
                warn!(username = %request.username, error = %e, "Registration rejected");
                ActionResult::from_error(&e, REGISTRATION_FAILED)
            }
        }
    }

    /// Make `company_id` the active company.
    ///
    /// Clears the permission map before contacting the backend, replaces
    /// the token, then fetches permissions for the new company. Gated UI
    /// sees either no permissions or the new company's, never the old
    /// company's.
    pub async fn switch_company(&self, company_id: &CompanyId) -> ActionResult {
        let Some(_in_flight) = self.submissions.try_begin(Submission::SwitchCompany) else {
            return ActionResult::failure(IN_PROGRESS);
        };

        let (token, from, epoch) = {
            let mut inner = self.inner.write();
            let token = match (&inner.token, inner.snapshot.is_authenticated()) {
                (Some(token), true) => token.clone(),
                _ => return ActionResult::failure(NOT_LOGGED_IN),
            };
            if inner.snapshot.company(company_id).is_none() {
                return ActionResult::failure(COMPANY_UNAVAILABLE);
            }
            let from = inner.active_company_id();
            if from.as_ref() == Some(company_id) {
                debug!(company_id = %company_id, "Company already active");
                return ActionResult::Success;
            }
            let epoch = inner.next_epoch();
            inner.snapshot.permissions = PermissionMap::new();
            (token, from, epoch)
        };

        let request = SwitchCompanyRequest {
            company_id: company_id.clone(),
        };
        let response = match self.api.switch_company(&token, &request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(company_id = %company_id, error = %e, "Company switch rejected");
                if e.is_auth_expired() {
                    self.expire_token(&token);
                } else {
                    self.restore_permissions(&token, epoch, from).await;
                }
                return ActionResult::from_error(&e, SWITCH_FAILED);
            }
        };

        if response.company.id != *company_id {
            warn!(
                requested = %company_id,
                granted = %response.company.id,
                "Backend scoped the new token to a different company"
            );
        }

        let new_token = response.access_token;
        let to = response.company.id.clone();
        let applied = {
            let mut inner = self.inner.write();
            if inner.epoch != epoch {
                Err(ActionResult::failure(SWITCH_SUPERSEDED))
            } else if let Err(e) = self.tokens.save(&new_token) {
                error!(error = %e, "Failed to persist switched access token");
                Err(ActionResult::failure(SWITCH_FAILED))
            } else {
                inner.token = Some(new_token.clone());
                inner.snapshot.state = SessionState::Authenticated {
                    company: Some(to.clone()),
                };
                inner.snapshot.active_company = Some(response.company);
                ensure_membership(&mut inner.snapshot);
                Ok(inner.actor())
            }
        };

        let actor = match applied {
            Ok(actor) => actor,
            Err(result) => {
                debug!(company_id = %company_id, "Discarding company switch response");
                if result.error() == Some(SWITCH_FAILED) {
                    self.restore_permissions(&token, epoch, from).await;
                }
                return result;
            }
        };

        self.emit(
            actor,
            SessionEvent::CompanySwitched {
                from: from.clone(),
                to: to.clone(),
            },
        );

        match self.api.me(&new_token).await {
            Ok(me) => {
                if !self.apply_identity(epoch, Some(to.clone()), me) {
                    return ActionResult::failure(SWITCH_SUPERSEDED);
                }
            }
            Err(e) => {
                warn!(company_id = %to, error = %e, "Permissions unavailable after company switch");
                if e.is_auth_expired() {
                    self.expire_token(&new_token);
                }
                return ActionResult::from_error(&e, SWITCH_FAILED);
            }
        }

        info!(from = ?from, to = %to, "Company switched");
        ActionResult::Success
    }

    /// Clear the session. Idempotent and never touches the network.
    pub fn logout(&self) {
        self.clear_session(LogoutReason::UserRequested);
    }

    /// Re-fetch identity, permissions and companies for the current token.
    pub async fn refresh(&self) -> AppResult<()> {
        let (token, epoch, issued_for) = {
            let inner = self.inner.read();
            let token = inner
                .token
                .clone()
                .ok_or_else(|| AppError::session(NOT_LOGGED_IN))?;
            (token, inner.epoch, inner.active_company_id())
        };

        let (me, companies) = match self.load_identity(&token).await {
            Ok(loaded) => loaded,
            Err(e) => {
                if e.is_auth_expired() {
                    self.expire_token(&token);
                }
                return Err(e);
            }
        };

        if !self.apply_identity(epoch, issued_for, me) {
            return Err(AppError::cancelled("Session changed while refreshing"));
        }
        self.apply_companies(epoch, companies);
        Ok(())
    }

    /// List records of `resource` in the active company.
    ///
    /// Fails with `Authorization` when the permission map lacks `read`, with
    /// `Cancelled` when the company scope ends mid-request, and with
    /// `Authentication` (after forcing a logout) when the backend rejects the
    /// token. An empty list means the backend really returned no records.
    pub async fn fetch_collection(&self, resource: Resource) -> AppResult<Vec<serde_json::Value>> {
        let (token, scope) = {
            let inner = self.inner.read();
            let token = match (&inner.token, inner.snapshot.is_authenticated()) {
                (Some(token), true) => token.clone(),
                _ => return Err(AppError::authentication(NOT_LOGGED_IN)),
            };
            PermissionGate::require(&inner.snapshot.permissions, Requirement::read(resource))?;
            (token, inner.scope.clone())
        };

        let result = tokio::select! {
            _ = scope.cancelled() => Err(AppError::cancelled(format!(
                "Request for '{resource}' cancelled: session scope changed"
            ))),
            result = self.api.fetch_collection(&token, resource) => result,
        };

        if let Err(e) = &result {
            if e.is_auth_expired() {
                warn!(resource = %resource, "Backend rejected token; forcing logout");
                self.expire_token(&token);
            }
        }
        result
    }

    // ── Internals ────────────────────────────────────────────────

    async fn load_identity(&self, token: &AccessToken) -> AppResult<(MeResponse, Vec<Company>)> {
        let me = self.api.me(token).await?;
        let companies = self.api.companies(token).await?;
        Ok((me, companies))
    }

    fn adopt_bootstrap(
        &self,
        epoch: u64,
        token: AccessToken,
        me: MeResponse,
        companies: Vec<Company>,
    ) -> bool {
        let mut inner = self.inner.write();
        if inner.epoch != epoch {
            debug!("Session changed during bootstrap; discarding validated identity");
            return false;
        }
        inner.token = Some(token);
        inner.snapshot.state = SessionState::Authenticated {
            company: me.company.as_ref().map(|c| c.id.clone()),
        };
        inner.snapshot.user = Some(me.user);
        inner.snapshot.active_company = me.company;
        inner.snapshot.role = me.role;
        inner.snapshot.permissions = me.permissions;
        inner.snapshot.companies = companies;
        ensure_membership(&mut inner.snapshot);
        true
    }

    /// Apply a `/me` response issued in `epoch` for company `issued_for`.
    /// Returns false (and changes nothing) if either is no longer current.
    fn apply_identity(&self, epoch: u64, issued_for: Option<CompanyId>, me: MeResponse) -> bool {
        let (actor, company_id) = {
            let mut inner = self.inner.write();
            if inner.epoch != epoch || inner.active_company_id() != issued_for {
                debug!(
                    issued_epoch = epoch,
                    current_epoch = inner.epoch,
                    "Discarding stale permission response"
                );
                return false;
            }

            if let Some(company) = me.company {
                if let Some(active) = inner.snapshot.active_company.as_ref() {
                    if active.id != company.id {
                        warn!(
                            active = %active.id,
                            reported = %company.id,
                            "Identity response reports a different company; adopting it"
                        );
                    }
                }
                inner.snapshot.active_company = Some(company);
            }

            let company_id = inner.active_company_id();
            inner.snapshot.user = Some(me.user);
            inner.snapshot.role = me.role;
            inner.snapshot.permissions = me.permissions;
            inner.snapshot.state = SessionState::Authenticated {
                company: company_id.clone(),
            };
            ensure_membership(&mut inner.snapshot);
            (inner.actor(), company_id)
        };

        self.emit(actor, SessionEvent::PermissionsRefreshed { company_id });
        true
    }

    fn apply_companies(&self, epoch: u64, companies: Vec<Company>) -> bool {
        let mut inner = self.inner.write();
        if inner.epoch != epoch {
            debug!("Discarding stale company list");
            return false;
        }
        inner.snapshot.companies = companies;
        ensure_membership(&mut inner.snapshot);
        true
    }

    /// Re-fetch permissions for the company that stays active after a
    /// failed switch.
    async fn restore_permissions(
        &self,
        token: &AccessToken,
        epoch: u64,
        company: Option<CompanyId>,
    ) {
        match self.api.me(token).await {
            Ok(me) => {
                self.apply_identity(epoch, company, me);
            }
            Err(e) => {
                warn!(error = %e, "Could not restore permissions after failed company switch");
                if e.is_auth_expired() {
                    self.expire_token(token);
                }
            }
        }
    }

    fn discard_persisted_token(&self, epoch: u64) {
        let inner = self.inner.read();
        if inner.epoch != epoch {
            return;
        }
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to remove rejected token");
        }
    }

    /// Force logout if `token` is still the session's token.
    fn expire_token(&self, token: &AccessToken) {
        let cleared = self.clear_session_if(LogoutReason::TokenExpired, |inner| {
            inner.token.as_ref() == Some(token)
        });
        if !cleared {
            debug!("Ignoring rejection of a token that was already replaced");
        }
    }

    fn clear_session(&self, reason: LogoutReason) {
        self.clear_session_if(reason, |_| true);
    }

    /// Reset the session if `current` holds, checked under the same write
    /// lock that performs the reset. Returns whether the reset happened.
    fn clear_session_if(&self, reason: LogoutReason, current: impl FnOnce(&Inner) -> bool) -> bool {
        let (had_session, actor) = {
            let mut inner = self.inner.write();
            if !current(&inner) {
                return false;
            }
            if let Err(e) = self.tokens.clear() {
                warn!(error = %e, "Failed to remove persisted token");
            }
            let had_session = inner.token.is_some() || inner.snapshot.user.is_some();
            let actor = inner.actor();
            inner.reset();
            (had_session, actor)
        };

        if had_session {
            info!(reason = %reason, "Session cleared");
            self.emit(actor, SessionEvent::LoggedOut { reason });
        }
        true
    }

    fn emit(&self, actor: Option<UserId>, payload: SessionEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(DomainEvent::new(actor, payload));
    }
}
