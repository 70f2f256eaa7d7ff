use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use chrono::{NaiveDate, Utc};
use teloxide::types::ChatId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::database::Database;
use crate::error::BotError;
use crate::models::{BookingDraft, ConfirmedBooking, CounselorCatalog, SlotCatalog};
use crate::wizard::{Action, BookingWizard, Transition};

type DraftCache = Arc<RwLock<HashMap<ChatId, (BookingDraft, SystemTime)>>>;

const BOOKINGS_LISTED: i64 = 10;

/// Result of one dispatched action. `changed` is false when the stored draft
/// is identical before and after, e.g. re-tapping the selected date.
#[derive(Debug)]
pub struct Dispatched {
    pub transition: Transition,
    pub changed: bool,
}

#[derive(Clone)]
pub struct BotState {
    db: Option<Database>,
    config: Arc<Config>,
    slots: Arc<SlotCatalog>,
    counselors: Arc<CounselorCatalog>,
    cache: DraftCache,
}

fn is_fresh(timestamp: SystemTime, ttl: Duration) -> bool {
    timestamp.elapsed().unwrap_or_default() < ttl
}

impl BotState {
    pub fn new(config: Config, db: Option<Database>) -> Self {
        let slots = SlotCatalog::with_horizon(config.horizon_days);
        Self::with_catalogs(config, db, slots, CounselorCatalog::default())
    }

    pub fn with_catalogs(
        config: Config,
        db: Option<Database>,
        slots: SlotCatalog,
        counselors: CounselorCatalog,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            slots: Arc::new(slots),
            counselors: Arc::new(counselors),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn slots(&self) -> &SlotCatalog {
        &self.slots
    }

    pub fn counselors(&self) -> &CounselorCatalog {
        &self.counselors
    }

    pub fn has_store(&self) -> bool {
        self.db.is_some()
    }

    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    /// Current draft of a chat, or a fresh one when none is cached.
    pub async fn draft(&self, chat_id: ChatId) -> BookingDraft {
        let cache = self.cache.read().await;
        match cache.get(&chat_id) {
            Some((draft, timestamp)) if is_fresh(*timestamp, self.config.draft_ttl) => draft.clone(),
            _ => BookingDraft::default(),
        }
    }

    pub async fn start_booking(&self, chat_id: ChatId) -> BookingDraft {
        let draft = BookingDraft::default();
        let mut cache = self.cache.write().await;
        cache.insert(chat_id, (draft.clone(), SystemTime::now()));
        log::debug!("📝 New booking draft for chat {}", chat_id);
        draft
    }

    /// Runs one wizard action against the chat's draft and stores the result.
    pub async fn dispatch(&self, chat_id: ChatId, action: Action) -> Dispatched {
        let start_time = Instant::now();
        let wizard = BookingWizard::new(&self.slots, &self.counselors, self.today());

        let mut cache = self.cache.write().await;
        let current = match cache.remove(&chat_id) {
            Some((draft, timestamp)) if is_fresh(timestamp, self.config.draft_ttl) => draft,
            _ => BookingDraft::default(),
        };

        let previous = current.clone();
        let transition = wizard.reduce(current, action);
        let changed = transition.draft() != &previous;
        cache.insert(chat_id, (transition.draft().clone(), SystemTime::now()));

        match transition.guard() {
            Some(guard) => log::debug!("🚫 Action ignored for chat {}: {:?}", chat_id, guard),
            None => log::debug!(
                "➡️ Chat {} at step {} in {:?}",
                chat_id,
                transition.draft().step.number(),
                start_time.elapsed()
            ),
        }

        Dispatched { transition, changed }
    }

    /// Logs a confirmed draft and records it when a store is configured.
    pub async fn record_booking(&self, chat_id: ChatId, draft: &BookingDraft) -> Result<ConfirmedBooking, BotError> {
        let booking = ConfirmedBooking::from_draft(Uuid::new_v4().to_string(), chat_id.0, draft, Utc::now())
            .ok_or(BotError::IncompleteBooking)?;

        log::info!("✅ Booking confirmed for chat {}: {}", chat_id, serde_json::to_string(draft)?);

        if let Some(db) = &self.db {
            db.insert_booking(&booking).await?;
            log::info!("💾 Booking {} stored", booking.id);
        }

        Ok(booking)
    }

    pub async fn bookings(&self, chat_id: ChatId) -> Result<Vec<ConfirmedBooking>, BotError> {
        match &self.db {
            Some(db) => db.bookings_for_chat(chat_id.0, BOOKINGS_LISTED).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn cleanup_cache(&self) {
        let mut cache = self.cache.write().await;
        let previous_count = cache.len();

        cache.retain(|_, (_, timestamp)| is_fresh(*timestamp, self.config.draft_ttl));

        let current_count = cache.len();
        log::debug!("🧹 Draft cache cleaned: {} -> {} entries", previous_count, current_count);
    }

    #[cfg(test)]
    async fn cached_chats(&self) -> usize {
        self.cache.read().await.len()
    }
}
