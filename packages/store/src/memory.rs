use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde_json::{Map, Value};

use crate::backend::{AuthService, EventStore, ProfileStore};
use crate::error::StoreError;
use crate::models::{AuthSession, AuthUser, Credentials, Event, Profile, SignUp};

/// A call received by a [`MemoryStore`], with the arguments it was given.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreCall {
    ListEvents,
    GetEvent(String),
    CreateEvent(Value),
    UpdateEvent(String, Value),
    DeleteEvent(String),
    /// The profile and the access token it was written with.
    InsertProfile(Profile, Option<String>),
    SignUp(String),
    SignIn(String),
    RefreshSession(String),
    GetUser(String),
    SignOut(String),
}

/// Store operations that can be made to fail with [`MemoryStore::fail`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    ListEvents,
    GetEvent,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    InsertProfile,
    SignUp,
    SignIn,
    RefreshSession,
    GetUser,
    SignOut,
}

impl StoreCall {
    pub fn operation(&self) -> Operation {
        match self {
            StoreCall::ListEvents => Operation::ListEvents,
            StoreCall::GetEvent(_) => Operation::GetEvent,
            StoreCall::CreateEvent(_) => Operation::CreateEvent,
            StoreCall::UpdateEvent(..) => Operation::UpdateEvent,
            StoreCall::DeleteEvent(_) => Operation::DeleteEvent,
            StoreCall::InsertProfile(..) => Operation::InsertProfile,
            StoreCall::SignUp(_) => Operation::SignUp,
            StoreCall::SignIn(_) => Operation::SignIn,
            StoreCall::RefreshSession(_) => Operation::RefreshSession,
            StoreCall::GetUser(_) => Operation::GetUser,
            StoreCall::SignOut(_) => Operation::SignOut,
        }
    }
}

#[derive(Debug)]
struct Account {
    user: AuthUser,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    events: Vec<Event>,
    next_event_id: i64,
    profiles: Vec<Profile>,
    accounts: HashMap<String, Account>,
    access_tokens: HashMap<String, String>,
    refresh_tokens: HashMap<String, String>,
    next_id: u64,
    require_confirmation: bool,
    failures: HashMap<Operation, StoreError>,
    calls: Vec<StoreCall>,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_event(&mut self, row: Value) -> Result<Event, StoreError> {
        let Value::Object(mut columns) = row else {
            return Err(StoreError::api(400, "Row must be a JSON object"));
        };
        if !columns.contains_key("id") {
            self.next_event_id += 1;
            columns.insert("id".to_string(), Value::from(self.next_event_id));
        }
        let event: Event = serde_json::from_value(Value::Object(columns))
            .map_err(|e| StoreError::api(400, e.to_string()))?;
        self.events.push(event.clone());
        Ok(event)
    }

    fn account_by_id(&self, user_id: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.user.id == user_id)
    }

    fn issue_session(&mut self, user: AuthUser) -> AuthSession {
        let n = self.next_id();
        let access_token = format!("access-{n}");
        let refresh_token = format!("refresh-{n}");
        self.access_tokens
            .insert(access_token.clone(), user.id.clone());
        self.refresh_tokens
            .insert(refresh_token.clone(), user.id.clone());
        AuthSession {
            access_token,
            refresh_token,
            token_type: Some("bearer".to_string()),
            expires_in: Some(3600),
            user,
        }
    }
}

/// In-memory stand-in for the hosted backend, for tests and local development.
///
/// Every call is recorded in a journal ([`MemoryStore::calls`]) and any
/// operation can be made to fail with a chosen message ([`MemoryStore::fail`]).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signups return no session until the address is confirmed.
    pub fn require_email_confirmation(self) -> Self {
        self.state().require_confirmation = true;
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record `call` and return the state, or the failure registered for it.
    fn begin(&self, call: StoreCall) -> Result<MutexGuard<'_, State>, StoreError> {
        let mut state = self.state();
        let operation = call.operation();
        state.calls.push(call);
        if let Some(error) = state.failures.get(&operation).cloned() {
            return Err(error);
        }
        Ok(state)
    }

    /// Make every later call of `operation` fail with `message`.
    pub fn fail(&self, operation: Operation, message: impl Into<String>) {
        self.state()
            .failures
            .insert(operation, StoreError::api(500, message));
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state().calls.clone()
    }

    /// Add a row without recording a call.
    pub fn seed_event(&self, row: Value) -> Result<Event, StoreError> {
        self.state().insert_event(row)
    }

    pub fn events(&self) -> Vec<Event> {
        self.state().events.clone()
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.state().profiles.clone()
    }

    pub fn user_by_email(&self, email: &str) -> Option<AuthUser> {
        self.state().accounts.get(email).map(|a| a.user.clone())
    }

    /// Invalidate an access token as if it had expired.
    pub fn expire_access_token(&self, access_token: &str) {
        self.state().access_tokens.remove(access_token);
    }
}

impl EventStore for MemoryStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let state = self.begin(StoreCall::ListEvents)?;
        let mut events = state.events.clone();
        // Ascending by date, rows without a date last.
        events.sort_by(|a, b| match (&a.date, &b.date) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(events)
    }

    async fn get_event(&self, id: &str) -> Result<Event, StoreError> {
        let state = self.begin(StoreCall::GetEvent(id.to_string()))?;
        state
            .events
            .iter()
            .find(|e| e.id.to_string() == id)
            .cloned()
            .ok_or_else(|| {
                StoreError::api(406, "JSON object requested, multiple (or no) rows returned")
            })
    }

    async fn create_event(&self, row: Value) -> Result<Option<Event>, StoreError> {
        let mut state = self.begin(StoreCall::CreateEvent(row.clone()))?;
        state.insert_event(row).map(Some)
    }

    async fn update_event(&self, id: &str, changes: Value) -> Result<Option<Event>, StoreError> {
        let mut state = self.begin(StoreCall::UpdateEvent(id.to_string(), changes.clone()))?;
        let Value::Object(changes) = changes else {
            return Err(StoreError::api(400, "Changes must be a JSON object"));
        };
        let Some(event) = state.events.iter_mut().find(|e| e.id.to_string() == id) else {
            return Ok(None);
        };

        let mut columns: Map<String, Value> = match serde_json::to_value(&*event)? {
            Value::Object(columns) => columns,
            _ => Map::new(),
        };
        columns.extend(changes);
        let updated: Event = serde_json::from_value(Value::Object(columns))
            .map_err(|e| StoreError::api(400, e.to_string()))?;
        *event = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.begin(StoreCall::DeleteEvent(id.to_string()))?;
        state.events.retain(|e| e.id.to_string() != id);
        Ok(())
    }
}

impl ProfileStore for MemoryStore {
    async fn insert_profile(
        &self,
        profile: &Profile,
        access_token: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut state = self.begin(StoreCall::InsertProfile(
            profile.clone(),
            access_token.map(str::to_string),
        ))?;
        if let Some(token) = access_token {
            if !state.access_tokens.contains_key(token) {
                return Err(StoreError::api(401, "invalid JWT: token is expired or malformed"));
            }
        }
        if state.profiles.iter().any(|p| p.id == profile.id) {
            return Err(StoreError::api(
                409,
                "duplicate key value violates unique constraint \"profiles_pkey\"",
            ));
        }
        state.profiles.push(profile.clone());
        Ok(())
    }
}

impl AuthService for MemoryStore {
    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUp, StoreError> {
        let mut state = self.begin(StoreCall::SignUp(credentials.email.clone()))?;
        if state.accounts.contains_key(&credentials.email) {
            return Err(StoreError::api(422, "User already registered"));
        }
        if credentials.password.len() < 6 {
            return Err(StoreError::api(
                422,
                "Password should be at least 6 characters.",
            ));
        }

        let n = state.next_id();
        let now = Utc::now();
        let user = AuthUser {
            id: format!("00000000-0000-4000-8000-{n:012}"),
            email: Some(credentials.email.clone()),
            phone: None,
            role: Some("authenticated".to_string()),
            email_confirmed_at: (!state.require_confirmation).then_some(now),
            created_at: Some(now),
        };
        state.accounts.insert(
            credentials.email.clone(),
            Account {
                user: user.clone(),
                password: credentials.password.clone(),
            },
        );

        let session = (!state.require_confirmation).then(|| state.issue_session(user.clone()));
        Ok(SignUp { user, session })
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, StoreError> {
        let mut state = self.begin(StoreCall::SignIn(credentials.email.clone()))?;
        let user = match state.accounts.get(&credentials.email) {
            Some(account) if account.password == credentials.password => account.user.clone(),
            _ => return Err(StoreError::api(400, "Invalid login credentials")),
        };
        if !user.is_confirmed() {
            return Err(StoreError::api(400, "Email not confirmed"));
        }
        Ok(state.issue_session(user))
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, StoreError> {
        let mut state = self.begin(StoreCall::RefreshSession(refresh_token.to_string()))?;
        let user = state
            .refresh_tokens
            .remove(refresh_token)
            .and_then(|user_id| state.account_by_id(&user_id).map(|a| a.user.clone()))
            .ok_or_else(|| {
                StoreError::api(400, "Invalid Refresh Token: Refresh Token Not Found")
            })?;
        Ok(state.issue_session(user))
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, StoreError> {
        let state = self.begin(StoreCall::GetUser(access_token.to_string()))?;
        state
            .access_tokens
            .get(access_token)
            .and_then(|user_id| state.account_by_id(user_id))
            .map(|a| a.user.clone())
            .ok_or_else(|| StoreError::api(401, "invalid JWT: token is expired or malformed"))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        let mut state = self.begin(StoreCall::SignOut(access_token.to_string()))?;
        if let Some(user_id) = state.access_tokens.remove(access_token) {
            state.refresh_tokens.retain(|_, owner| *owner != user_id);
        }
        Ok(())
    }
}
