#![no_std]


mod errors;
mod events;
mod types;

pub use errors::Error;
pub use types::{Notification, NotificationType};

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Vec};

// ==================== Storage Keys ====================

#[contracttype]
pub enum DataKey {
    // Singleton / lifecycle — instance storage
    Initialized,
    Admin,

    // Sender authorization — instance storage
    AuthorizedSenders, // Vec<Address>, bounded by MAX_SENDERS

    // Notification rows — persistent
    NotifCount,               // u64 — monotonic ID counter
    Notif(u64),               // Notification
    RecipientNotifs(Address), // Vec<u64> — insertion order (oldest first)
}

// ==================== Constants ====================

/// Maximum distinct authorized senders (peer contracts + admin).
const MAX_SENDERS: u32 = 20;
/// Maximum notifications retained per recipient (ring-buffer eviction).
const MAX_USER_NOTIFS: u32 = 200;
/// Maximum page size for notification list queries.
const MAX_PAGE_SIZE: u32 = 100;

// String byte-length ceilings
const MAX_TITLE_LEN: u32 = 100;
const MAX_BODY_LEN: u32 = 500;

// ==================== Contract ====================

#[contract]
pub struct NotificationHubContract;

#[contractimpl]
impl NotificationHubContract {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Initialise the contract. Must be called exactly once.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::AuthorizedSenders, &Vec::<Address>::new(&env));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sender Authorization
    // ------------------------------------------------------------------

    /// Authorise `sender` (a peer contract address) to emit notifications.
    pub fn add_authorized_sender(
        env: Env,
        caller: Address,
        sender: Address,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut senders = Self::read_authorized_senders(&env);
        if senders.contains(sender.clone()) {
            return Ok(()); // Idempotent
        }
        if senders.len() >= MAX_SENDERS {
            return Err(Error::MaxSendersReached);
        }
        senders.push_back(sender.clone());
        env.storage()
            .instance()
            .set(&DataKey::AuthorizedSenders, &senders);

        events::emit_sender_auth(&env, sender, caller, true);
        Ok(())
    }

    /// Revoke a sender's authorisation.
    pub fn remove_authorized_sender(
        env: Env,
        caller: Address,
        sender: Address,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let senders = Self::read_authorized_senders(&env);
        let mut updated = Vec::new(&env);
        let mut found = false;
        for s in senders.iter() {
            if s == sender {
                found = true;
            } else {
                updated.push_back(s);
            }
        }
        if !found {
            return Err(Error::SenderNotFound);
        }
        env.storage()
            .instance()
            .set(&DataKey::AuthorizedSenders, &updated);

        events::emit_sender_auth(&env, sender, caller, false);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Create a notification row for `recipient`. Caller must be the admin
    /// or an authorised peer contract. `notif_type` is a
    /// `NotificationType` repr value.
    ///
    /// Peer contracts invoke this fire-and-forget: a failure here never
    /// propagates into the mutation that triggered it.
    pub fn emit_notification(
        env: Env,
        sender: Address,
        recipient: Address,
        notif_type: u32,
        title: String,
        body: String,
        reference_id: Option<u64>,
    ) -> Result<u64, Error> {
        Self::require_initialized(&env)?;
        sender.require_auth();
        Self::require_authorized(&env, &sender)?;

        let notif_type =
            NotificationType::from_u32(notif_type).ok_or(Error::InvalidNotifType)?;
        Self::validate_title(&title)?;
        Self::validate_body(&body)?;

        let notif_id = Self::next_notif_id(&env);
        let notif = Notification {
            id: notif_id,
            recipient: recipient.clone(),
            sender: sender.clone(),
            notif_type,
            title,
            body,
            reference_id,
            is_read: false,
            read_at: None,
            created_at: env.ledger().timestamp(),
        };
        Self::store_notification(&env, notif);

        events::emit_notification_created(
            &env,
            notif_id,
            recipient,
            sender,
            notif_type as u32,
            reference_id,
        );
        Ok(notif_id)
    }

    // ------------------------------------------------------------------
    // Retrieval
    // ------------------------------------------------------------------

    /// Fetch a single notification. Only the recipient or admin may view it.
    pub fn get_notification(
        env: Env,
        caller: Address,
        notif_id: u64,
    ) -> Result<Notification, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let notif = Self::load_notification(&env, notif_id)?;
        if notif.recipient != caller && !Self::is_admin(&env, &caller) {
            return Err(Error::NotAuthorized);
        }
        Ok(notif)
    }

    /// The caller's notifications, newest first. `limit` is clamped to
    /// 1..=100; `unread_only` restricts to `is_read == false` rows.
    pub fn list_notifications(
        env: Env,
        caller: Address,
        unread_only: bool,
        limit: u32,
    ) -> Result<Vec<Notification>, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let ids = Self::read_recipient_ids(&env, &caller);
        let mut out: Vec<Notification> = Vec::new(&env);

        // Iterate newest-first (push_back → last element is newest).
        let mut idx = ids.len();
        while idx > 0 && out.len() < limit {
            idx -= 1;
            let notif_id = match ids.get(idx) {
                Some(id) => id,
                None => break,
            };
            if let Some(notif) = env
                .storage()
                .persistent()
                .get::<DataKey, Notification>(&DataKey::Notif(notif_id))
            {
                if unread_only && notif.is_read {
                    continue;
                }
                out.push_back(notif);
            }
        }
        Ok(out)
    }

    /// Number of unread notifications for `user`.
    ///
    /// Recounted from the stored rows on every call — there is no cached
    /// counter anywhere, so this can never drift from ground truth.
    pub fn unread_count(env: Env, user: Address) -> Result<u32, Error> {
        Self::require_initialized(&env)?;

        let ids = Self::read_recipient_ids(&env, &user);
        let mut count: u32 = 0;
        for notif_id in ids.iter() {
            if let Some(notif) = env
                .storage()
                .persistent()
                .get::<DataKey, Notification>(&DataKey::Notif(notif_id))
            {
                if !notif.is_read {
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Read-state transitions
    // ------------------------------------------------------------------

    /// Mark a notification as read. Only the recipient may call this.
    /// Idempotent: re-marking an already read row succeeds and leaves
    /// `read_at` unchanged.
    pub fn mark_read(env: Env, caller: Address, notif_id: u64) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut notif = Self::load_notification(&env, notif_id)?;
        if notif.recipient != caller {
            return Err(Error::NotAuthorized);
        }
        if notif.is_read {
            return Ok(());
        }

        notif.is_read = true;
        notif.read_at = Some(env.ledger().timestamp());
        env.storage()
            .persistent()
            .set(&DataKey::Notif(notif_id), &notif);

        events::emit_notification_read(&env, notif_id, caller);
        Ok(())
    }

    /// Mark every unread notification for the caller as read, in one
    /// transaction. Returns the count of newly-read rows.
    pub fn mark_all_read(env: Env, caller: Address) -> Result<u32, Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let ids = Self::read_recipient_ids(&env, &caller);
        let timestamp = env.ledger().timestamp();
        let mut newly_read: u32 = 0;

        for notif_id in ids.iter() {
            if let Some(mut notif) = env
                .storage()
                .persistent()
                .get::<DataKey, Notification>(&DataKey::Notif(notif_id))
            {
                if !notif.is_read {
                    notif.is_read = true;
                    notif.read_at = Some(timestamp);
                    env.storage()
                        .persistent()
                        .set(&DataKey::Notif(notif_id), &notif);
                    newly_read += 1;
                }
            }
        }

        events::emit_all_read(&env, caller, newly_read);
        Ok(newly_read)
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn is_admin(env: &Env, caller: &Address) -> bool {
        match env
            .storage()
            .instance()
            .get::<DataKey, Address>(&DataKey::Admin)
        {
            Some(admin) => admin == *caller,
            None => false,
        }
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        if !Self::is_admin(env, caller) {
            return Err(Error::NotAuthorized);
        }
        Ok(())
    }

    fn read_authorized_senders(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::AuthorizedSenders)
            .unwrap_or(Vec::new(env))
    }

    fn require_authorized(env: &Env, sender: &Address) -> Result<(), Error> {
        if Self::is_admin(env, sender) {
            return Ok(());
        }
        if !Self::read_authorized_senders(env).contains(sender.clone()) {
            return Err(Error::SenderNotAuthorized);
        }
        Ok(())
    }

    fn next_notif_id(env: &Env) -> u64 {
        let current: u64 = env
            .storage()
            .persistent()
            .get(&DataKey::NotifCount)
            .unwrap_or(0);
        let next = current + 1;
        env.storage().persistent().set(&DataKey::NotifCount, &next);
        next
    }

    fn read_recipient_ids(env: &Env, user: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::RecipientNotifs(user.clone()))
            .unwrap_or(Vec::new(env))
    }

    fn store_notification(env: &Env, notif: Notification) {
        let recipient = notif.recipient.clone();
        let notif_id = notif.id;
        env.storage()
            .persistent()
            .set(&DataKey::Notif(notif_id), &notif);

        let mut ids = Self::read_recipient_ids(env, &recipient);
        ids.push_back(notif_id);

        // Ring-buffer eviction: drop the oldest row past the cap.
        while ids.len() > MAX_USER_NOTIFS {
            if let Some(oldest) = ids.first() {
                env.storage().persistent().remove(&DataKey::Notif(oldest));
            }
            ids.pop_front();
        }
        env.storage()
            .persistent()
            .set(&DataKey::RecipientNotifs(recipient), &ids);
    }

    fn load_notification(env: &Env, notif_id: u64) -> Result<Notification, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Notif(notif_id))
            .ok_or(Error::NotificationNotFound)
    }

    fn validate_title(title: &String) -> Result<(), Error> {
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(Error::TitleTooLong);
        }
        Ok(())
    }

    fn validate_body(body: &String) -> Result<(), Error> {
        if body.is_empty() {
            return Err(Error::EmptyBody);
        }
        if body.len() > MAX_BODY_LEN {
            return Err(Error::BodyTooLong);
        }
        Ok(())
    }
}
